// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-side state for trellis graphs.
//!
//! This crate sits between [`trellis_core`]'s controller and a drawing
//! backend. It provides:
//!
//! - [`RenderCache`]: a [`Renderer`](trellis_core::renderer::Renderer) that
//!   keeps render-owned copies of everything the controller pushes
//! - [`RenderPlan`] and [`RenderItem`]: the decorations of one frame
//! - [`DamageRegion`]: what changed since the previous frame
//! - [`handoff`] (feature `std`): moving sync batches from the control
//!   thread to the render thread

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod cache;
mod damage;
mod plan;

#[cfg(feature = "std")]
pub mod handoff;

pub use cache::{AxisCache, RenderCache};
pub use damage::DamageRegion;
pub use plan::{RenderItem, RenderPlan};
