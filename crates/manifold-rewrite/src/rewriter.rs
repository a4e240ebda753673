// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch-facing rewriter over the shared registry lock.

use std::sync::Arc;

use manifold_core::error::ManifoldError;
use manifold_core::reference::Reference;
use manifold_core::types::InvokeExtras;
use manifold_registry::registry::EndpointRegistry;
use tokio::sync::RwLock;

use crate::rewrite;

/// Translates references for the host's dispatch layer.
///
/// Holds the same shared registry the activator populates; every method
/// takes a read lock, so rewriting overlaps freely with other readers and
/// with at most the one writer doing declaration or activation.
#[derive(Clone)]
pub struct ReferenceRewriter {
    registry: Arc<RwLock<EndpointRegistry>>,
}

impl ReferenceRewriter {
    /// Create a rewriter over a shared registry.
    pub fn new(registry: Arc<RwLock<EndpointRegistry>>) -> Self {
        Self { registry }
    }

    /// Rewrite plugin-space to container-space; identity for references
    /// whose authority is not registered.
    pub async fn rewrite_outbound(&self, reference: &Reference) -> Reference {
        let registry = self.registry.read().await;
        rewrite::rewrite_outbound(&registry, reference)
    }

    /// [`rewrite_outbound`](Self::rewrite_outbound), additionally storing
    /// the rewritten reference in the extras' carried slot so the generic
    /// invoke transport can recover it on arrival.
    pub async fn rewrite_outbound_carried(
        &self,
        reference: &Reference,
        extras: &mut InvokeExtras,
    ) -> Reference {
        let rewritten = self.rewrite_outbound(reference).await;
        extras.store_carried(&rewritten);
        rewritten
    }

    /// Rewrite container-space back to plugin-space.
    ///
    /// Errors with [`ManifoldError::UnrecognizedAuthority`] when the
    /// reference's authority matches no registered container authority.
    pub async fn rewrite_inbound(&self, reference: &Reference) -> Result<Reference, ManifoldError> {
        let registry = self.registry.read().await;
        rewrite::rewrite_inbound(&registry, reference)
    }

    /// Recover the reference carried through a generic invoke call, clear
    /// the slot, and resolve it to plugin-space.
    pub async fn rewrite_inbound_carried(
        &self,
        extras: &mut InvokeExtras,
    ) -> Result<Reference, ManifoldError> {
        let Some(raw) = extras.take_carried() else {
            return Err(ManifoldError::Internal(
                "invoke extras carry no reference".to_string(),
            ));
        };
        self.rewrite_inbound(&Reference::parse(raw)).await
    }
}
