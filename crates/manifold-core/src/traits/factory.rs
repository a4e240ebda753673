// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-supplied factory that produces handler instances.

use async_trait::async_trait;

use crate::error::FactoryError;
use crate::traits::handler::EndpointHandler;
use crate::types::LoadContext;

/// Instantiates handlers from class names.
///
/// The factory encapsulates the host's plugin code loading; its latency and
/// failure modes are opaque to the core. Failures come back as an opaque
/// [`FactoryError`], which the registry wraps with (group, class name,
/// authorities) context. Timeout or cancellation around the call, if any,
/// is the host's responsibility.
#[async_trait]
pub trait HandlerFactory: Send + Sync {
    /// Create a new, unattached handler instance for `class_name`.
    async fn instantiate(
        &self,
        context: &LoadContext,
        class_name: &str,
    ) -> Result<Box<dyn EndpointHandler>, FactoryError>;
}
