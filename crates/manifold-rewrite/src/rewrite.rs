// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two rewriting algorithms, as pure functions over a registry snapshot.
//!
//! Outbound translates plugin-space to container-space by prefixing the
//! container authority; the original plugin authority stays behind as the
//! first path segment so the inbound direction can disambiguate between the
//! several plugin authorities sharing one container authority.

use manifold_core::error::ManifoldError;
use manifold_core::reference::Reference;
use manifold_registry::registry::EndpointRegistry;
use regex::Regex;
use tracing::{debug, warn};

/// Rewrite a plugin-space reference into container-space.
///
/// `scheme://plugin/tail` becomes `scheme://container/plugin/tail`. A
/// reference whose authority is not in the registry is not ours and passes
/// through unchanged.
pub fn rewrite_outbound(registry: &EndpointRegistry, reference: &Reference) -> Reference {
    let authority = reference.authority();
    if authority.is_empty() {
        return reference.clone();
    }
    let Some(container) = registry.container_authority(authority) else {
        return reference.clone();
    };

    let scheme = reference.scheme();
    // Everything after "scheme://", including the plugin authority itself.
    let tail = &reference.as_str()[scheme.len() + 3..];
    let rewritten = Reference::parse(format!("{scheme}://{container}/{tail}"));
    debug!(
        plugin = authority,
        container,
        reference = reference.as_str(),
        "outbound rewrite"
    );
    rewritten
}

/// Rewrite a container-space reference back into plugin-space.
///
/// Candidates are the plugin authorities declared under the reference's
/// container authority, tried in declaration order; none at all is
/// [`ManifoldError::UnrecognizedAuthority`]. For each candidate the pattern
/// `^scheme://((?:container/)*)plugin` strips the run of leading
/// `container/` segments, which covers the three accepted shapes:
///
/// 1. `scheme://container/plugin…` — direct call from inside plugin-space,
/// 2. `scheme://container/container/plugin…` — the generic-invoke path adds
///    a second container segment,
/// 3. `scheme://plugin…` — external caller already in plugin-space.
///
/// The first candidate that matches structurally wins, so prefix-overlapping
/// plugin authorities resolve by declaration order. When nothing matches,
/// the `container/` substring is stripped once as a last resort; that path
/// can be imprecise for pathological inputs and is logged as a warning.
pub fn rewrite_inbound(
    registry: &EndpointRegistry,
    reference: &Reference,
) -> Result<Reference, ManifoldError> {
    let container = reference.authority();
    let candidates = registry.plugin_authorities_for(container);
    if candidates.is_empty() {
        return Err(ManifoldError::UnrecognizedAuthority {
            authority: container.to_string(),
        });
    }

    let raw = reference.as_str();
    let scheme_escaped = regex::escape(reference.scheme());
    let container_escaped = regex::escape(container);

    for plugin in candidates {
        let pattern = format!(
            "^{scheme_escaped}://((?:{container_escaped}/)*){}",
            regex::escape(plugin)
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| ManifoldError::Internal(format!("inbound pattern build failed: {e}")))?;
        let Some(captures) = regex.captures(raw) else {
            // Several plugin authorities can share this container authority;
            // this candidate just is not the one the reference names.
            continue;
        };
        let Some(prefix) = captures.get(1) else {
            continue;
        };
        let stripped = format!("{}{}", &raw[..prefix.start()], &raw[prefix.end()..]);
        debug!(
            container,
            plugin,
            reference = raw,
            "inbound rewrite"
        );
        return Ok(Reference::parse(stripped));
    }

    // Last resort: strip the container segment once. Imprecise when one
    // authority is a textual prefix of another, kept for compatibility.
    warn!(
        container,
        reference = raw,
        "no structural match for inbound reference, stripping container segment"
    );
    Ok(Reference::parse(
        raw.replacen(&format!("{container}/"), "", 1),
    ))
}
