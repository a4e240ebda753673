// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical reference model: `scheme://authority[/path][?query]`.
//!
//! A [`Reference`] keeps the exact raw string it was parsed from. Rewriting
//! must round-trip byte-for-byte, so the raw form is the source of truth and
//! the accessors are cheap delimiter scans over it. No normalizing URL
//! library is involved on purpose.

use serde::{Deserialize, Serialize};

/// A hierarchical reference in either plugin-space or container-space.
///
/// Parsing is lenient: any string is a valid `Reference`. A string without a
/// `://` separator simply has an empty scheme and authority, and passes
/// through the rewriters unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference {
    raw: String,
}

impl Reference {
    /// Wrap a raw reference string.
    pub fn parse(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The exact string this reference was built from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the reference, yielding the raw string.
    pub fn into_string(self) -> String {
        self.raw
    }

    /// The scheme segment (before `://`), or `""` if there is none.
    pub fn scheme(&self) -> &str {
        self.split_scheme().map(|(scheme, _)| scheme).unwrap_or("")
    }

    /// The authority segment (after `://`, before the first `/`, `?` or `#`),
    /// or `""` if the reference has no `://` separator.
    pub fn authority(&self) -> &str {
        let Some((_, rest)) = self.split_scheme() else {
            return "";
        };
        let end = rest
            .find(['/', '?', '#'])
            .unwrap_or(rest.len());
        &rest[..end]
    }

    /// Split into `(scheme, everything-after-"://")`.
    pub(crate) fn split_scheme(&self) -> Option<(&str, &str)> {
        let idx = self.raw.find("://")?;
        Some((&self.raw[..idx], &self.raw[idx + 3..]))
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Reference {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Reference {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_and_authority_with_path() {
        let r = Reference::parse("content://p.feed/items/1");
        assert_eq!(r.scheme(), "content");
        assert_eq!(r.authority(), "p.feed");
        assert_eq!(r.as_str(), "content://p.feed/items/1");
    }

    #[test]
    fn authority_without_path() {
        let r = Reference::parse("content://p.feed");
        assert_eq!(r.authority(), "p.feed");
    }

    #[test]
    fn authority_ends_at_query() {
        let r = Reference::parse("content://p.feed?limit=10");
        assert_eq!(r.authority(), "p.feed");
    }

    #[test]
    fn authority_ends_at_fragment() {
        let r = Reference::parse("content://p.feed#top");
        assert_eq!(r.authority(), "p.feed");
    }

    #[test]
    fn no_scheme_separator_yields_empty_parts() {
        let r = Reference::parse("just-a-string");
        assert_eq!(r.scheme(), "");
        assert_eq!(r.authority(), "");
        assert_eq!(r.as_str(), "just-a-string");
    }

    #[test]
    fn display_preserves_raw_form_exactly() {
        let raw = "content://p.feed/items/1?sort=asc#frag";
        assert_eq!(Reference::parse(raw).to_string(), raw);
    }
}
