// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the Manifold registry and rewrite crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reference::Reference;

/// Static declaration of one plugin endpoint, made before activation and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Implementing class name, resolved by the host's factory.
    pub class_name: String,
    /// One or more `;`-separated authority strings.
    pub authorities: String,
    /// Whether the endpoint grants reference permissions to callers.
    pub grant_permissions: bool,
}

impl EndpointDescriptor {
    /// Iterate the non-blank `;`-separated authority strings.
    pub fn authority_list(&self) -> impl Iterator<Item = &str> {
        self.authorities
            .split(';')
            .map(str::trim)
            .filter(|authority| !authority.is_empty())
    }

    /// The first declared authority, if any. This is the authority a
    /// descriptor is registered under when declared from a manifest.
    pub fn primary_authority(&self) -> Option<&str> {
        self.authority_list().next()
    }
}

/// The one physical endpoint the host registers for a plugin group.
/// Every plugin authority in the group maps to its `authority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEndpoint {
    /// Class name of the host-side container component.
    pub class_name: String,
    /// Container authority the host physically registered.
    pub authority: String,
}

/// Class-loading context handed to the factory when instantiating a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// Plugin group whose loading context the class resolves against.
    pub group_id: String,
}

/// Metadata attached to a freshly created handler before it is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationContext {
    /// Identity of the hosting process.
    pub host_identity: String,
    /// Implementing class name from the descriptor.
    pub class_name: String,
    /// Raw `;`-separated authority string from the descriptor.
    pub authorities: String,
    /// Permission flag from the descriptor.
    pub grant_permissions: bool,
}

/// Out-of-band extras attached to a generic "invoke" call.
///
/// The carried reference slot smuggles a rewritten reference through an
/// invoke transport that cannot carry a typed authority. Its lifecycle is
/// part of the message contract: written once by
/// `rewrite_outbound_carried`, read once and cleared by
/// `rewrite_inbound_carried`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeExtras {
    carried_reference: Option<String>,
    /// Opaque key-value payload forwarded to the handler untouched.
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl InvokeExtras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reference in the carried slot, replacing any previous value.
    pub fn store_carried(&mut self, reference: &Reference) {
        self.carried_reference = Some(reference.as_str().to_string());
    }

    /// Take the carried reference out of the slot, clearing it.
    pub fn take_carried(&mut self) -> Option<String> {
        self.carried_reference.take()
    }

    /// Peek at the carried reference without clearing the slot.
    pub fn carried(&self) -> Option<&str> {
        self.carried_reference.as_deref()
    }
}
