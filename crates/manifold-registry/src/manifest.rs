// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint manifest parsing from `endpoints.toml` files.
//!
//! A manifest describes one plugin group: the container endpoint the host
//! registers physically, and the plugin endpoints to multiplex behind it.

use manifold_core::error::ManifoldError;
use manifold_core::types::{ContainerEndpoint, EndpointDescriptor};
use serde::Deserialize;

/// Parsed endpoint manifest for one plugin group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointManifest {
    /// The physical endpoint shared by every plugin authority in the group.
    pub container: ContainerEndpoint,
    /// Declared endpoints, in manifest order.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Intermediate TOML deserialization struct for `endpoints.toml`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    container: ContainerSection,
    #[serde(default, rename = "endpoint")]
    endpoints: Vec<EndpointSection>,
}

/// The `[container]` section.
#[derive(Debug, Deserialize)]
struct ContainerSection {
    class: String,
    authority: String,
}

/// One `[[endpoint]]` section.
#[derive(Debug, Deserialize)]
struct EndpointSection {
    class: String,
    authorities: String,
    #[serde(default)]
    grant_permissions: bool,
}

/// Parse an endpoint manifest from TOML content.
///
/// Validates that the container class and authority are non-empty and that
/// every endpoint has a non-empty class and at least one non-blank
/// `;`-separated authority.
pub fn parse_endpoint_manifest(toml_content: &str) -> Result<EndpointManifest, ManifoldError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| ManifoldError::Manifest(format!("invalid endpoint manifest: {e}")))?;

    if file.container.class.is_empty() {
        return Err(ManifoldError::Manifest(
            "container class must not be empty".to_string(),
        ));
    }
    if file.container.authority.is_empty() {
        return Err(ManifoldError::Manifest(
            "container authority must not be empty".to_string(),
        ));
    }

    let mut endpoints = Vec::with_capacity(file.endpoints.len());
    for section in file.endpoints {
        if section.class.is_empty() {
            return Err(ManifoldError::Manifest(
                "endpoint class must not be empty".to_string(),
            ));
        }
        let descriptor = EndpointDescriptor {
            class_name: section.class,
            authorities: section.authorities,
            grant_permissions: section.grant_permissions,
        };
        if descriptor.primary_authority().is_none() {
            return Err(ManifoldError::Manifest(format!(
                "endpoint '{}' must declare at least one authority",
                descriptor.class_name
            )));
        }
        endpoints.push(descriptor);
    }

    Ok(EndpointManifest {
        container: ContainerEndpoint {
            class_name: file.container.class,
            authority: file.container.authority,
        },
        endpoints,
    })
}
