// SPDX-FileCopyrightText: 2026 Manifold Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the Manifold core and the host process.

pub mod factory;
pub mod handler;

pub use factory::HandlerFactory;
pub use handler::EndpointHandler;
