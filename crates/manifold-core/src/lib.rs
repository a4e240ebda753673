// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Manifold address-virtualization subsystem.
//!
//! Manifold multiplexes many plugin data endpoints (plugin authorities)
//! behind one physical endpoint per plugin group (the container authority).
//! This crate provides the foundational pieces shared by the registry and
//! rewriting crates: the error type, the [`Reference`] model, endpoint
//! descriptor types, and the traits the host implements to supply handler
//! instances.

pub mod error;
pub mod reference;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{FactoryError, ManifoldError};
pub use reference::Reference;
pub use types::{
    ContainerEndpoint, EndpointDescriptor, InitializationContext, InvokeExtras, LoadContext,
};

pub use traits::{EndpointHandler, HandlerFactory};
