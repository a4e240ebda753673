// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference rewriting between plugin-space and container-space.
//!
//! Every reference entering or leaving the subsystem passes through here
//! before the host's component-invocation machinery sees it. The algorithms
//! in [`rewrite`] are stateless over a registry snapshot; the
//! [`ReferenceRewriter`] facade runs them under the shared registry lock.

pub mod rewrite;
pub mod rewriter;

pub use rewrite::{rewrite_inbound, rewrite_outbound};
pub use rewriter::ReferenceRewriter;
