// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin orchestration around declaration and group activation.
//!
//! The activator is the only place handler instantiation happens. It holds
//! the host-supplied factory and host identity, and drives the shared
//! registry through its lock: declarations and activation take the write
//! lock, so no two calls can race to instantiate the same authority, while
//! the rewrite read path stays open to any number of concurrent readers.

use std::sync::Arc;

use manifold_core::error::ManifoldError;
use manifold_core::traits::HandlerFactory;
use manifold_core::types::{ContainerEndpoint, EndpointDescriptor};
use tokio::sync::RwLock;
use tracing::info;

use crate::manifest::EndpointManifest;
use crate::registry::EndpointRegistry;

/// Declares and activates plugin groups against a shared registry.
pub struct EndpointActivator {
    registry: Arc<RwLock<EndpointRegistry>>,
    factory: Arc<dyn HandlerFactory>,
    host_identity: String,
}

impl EndpointActivator {
    /// Create an activator over a shared registry.
    ///
    /// `host_identity` is attached to every handler at initialization.
    pub fn new(
        registry: Arc<RwLock<EndpointRegistry>>,
        factory: Arc<dyn HandlerFactory>,
        host_identity: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            factory,
            host_identity: host_identity.into(),
        }
    }

    /// Declare every endpoint of a parsed manifest under `group_id`.
    ///
    /// Each descriptor is declared under its first `;`-separated authority;
    /// secondary authorities receive handler entries at activation but no
    /// container mapping of their own. A descriptor without any non-blank
    /// authority is rejected by manifest parsing before it gets here.
    pub async fn declare_manifest(
        &self,
        group_id: &str,
        manifest: &EndpointManifest,
    ) -> Result<(), ManifoldError> {
        let mut registry = self.registry.write().await;
        for endpoint in &manifest.endpoints {
            let plugin_authority = endpoint.primary_authority().ok_or_else(|| {
                ManifoldError::Manifest(format!(
                    "endpoint '{}' declares no authority",
                    endpoint.class_name
                ))
            })?;
            registry.declare(group_id, endpoint.clone(), &manifest.container, plugin_authority)?;
        }
        info!(
            group = group_id,
            container = manifest.container.authority.as_str(),
            endpoints = manifest.endpoints.len(),
            "manifest declared"
        );
        Ok(())
    }

    /// Declare a single endpoint descriptor. See
    /// [`EndpointRegistry::declare`].
    pub async fn declare(
        &self,
        group_id: &str,
        descriptor: EndpointDescriptor,
        container: &ContainerEndpoint,
        plugin_authority: &str,
    ) -> Result<(), ManifoldError> {
        self.registry
            .write()
            .await
            .declare(group_id, descriptor, container, plugin_authority)
    }

    /// Instantiate and attach handlers for every descriptor declared under
    /// `group_id`, in declaration order.
    ///
    /// Holding the write lock across the factory calls serializes activation
    /// for the whole registry; the factory's latency is the host's problem,
    /// not ours, and activation runs on a setup path before load-bearing
    /// traffic.
    pub async fn activate_group(&self, group_id: &str) -> Result<(), ManifoldError> {
        let mut registry = self.registry.write().await;
        registry
            .activate_group(group_id, self.factory.as_ref(), &self.host_identity)
            .await
    }

    /// Handle to the shared registry, for lookups and the rewriters.
    pub fn registry(&self) -> Arc<RwLock<EndpointRegistry>> {
        Arc::clone(&self.registry)
    }
}
