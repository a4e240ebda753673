// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Manifold address-virtualization core.

use thiserror::Error;

/// Opaque error produced by host-supplied factories and handlers.
///
/// The core never inspects these; it wraps them with identifying context
/// (group, class name, authorities) and propagates them.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across Manifold registry and rewrite operations.
#[derive(Debug, Error)]
pub enum ManifoldError {
    /// The same plugin authority was declared twice. Fatal; never retried.
    #[error("duplicate registration for plugin authority '{authority}'")]
    DuplicateRegistration { authority: String },

    /// Handler instantiation or initialization failed during group activation.
    ///
    /// Earlier descriptors activated in the same call are kept; the failure
    /// carries enough context to identify the offending declaration.
    #[error(
        "activation failed for group '{group}', class '{class_name}', authorities '{authorities}'"
    )]
    Activation {
        group: String,
        class_name: String,
        authorities: String,
        #[source]
        source: FactoryError,
    },

    /// An inbound reference names a container authority nobody registered.
    /// Signals a protocol or configuration mismatch, not a transient fault.
    #[error("unrecognized container authority: {authority}")]
    UnrecognizedAuthority { authority: String },

    /// Endpoint manifest errors (invalid TOML, missing required fields).
    #[error("endpoint manifest error: {0}")]
    Manifest(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
