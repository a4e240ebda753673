// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint registry and activation for the Manifold subsystem.
//!
//! The [`EndpointRegistry`] holds the authoritative mapping from plugin
//! authority to handler instance and to container authority, plus the
//! declared descriptors of each plugin group. The [`EndpointActivator`]
//! drives handler instantiation through the host-supplied factory, and the
//! manifest module parses endpoint declarations from `endpoints.toml` files.

pub mod activator;
pub mod manifest;
pub mod registry;

pub use activator::EndpointActivator;
pub use manifest::{parse_endpoint_manifest, EndpointManifest};
pub use registry::EndpointRegistry;
