// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The live instance backing one plugin authority.

use crate::error::FactoryError;
use crate::types::InitializationContext;

/// A handler answers requests for one plugin authority.
///
/// The registry creates a handler at most once per authority and owns it for
/// the process lifetime of its plugin group. [`attach`](Self::attach) is
/// called exactly once, before the handler is shared; it receives the host
/// identity and the descriptor metadata the handler was declared with.
///
/// Request delivery itself is out of scope here: once a reference has been
/// resolved to a handler, the host's dispatch machinery takes over.
pub trait EndpointHandler: Send + Sync + 'static {
    /// Attach host identity and descriptor metadata to the handler.
    ///
    /// A failure here aborts activation of the handler's descriptor and is
    /// wrapped with the declaring group's context.
    fn attach(&mut self, context: &InitializationContext) -> Result<(), FactoryError>;
}
