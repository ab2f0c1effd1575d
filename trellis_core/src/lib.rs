// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller, axes, theme and change tracking for frame-synchronized 3D graphs.
//!
//! `trellis_core` is the synchronization core of a 3D bar / scatter / surface
//! graph. Application code mutates a front-end object graph (controller,
//! axes, theme) freely; once per frame a single sync pass pushes every
//! changed property to a render-side mirror through typed updates. The crate
//! is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Axis / Theme / scene setters
//!       │  (value stored, one dirty key marked, listener fired)
//!       ▼
//!   ChangeTracker ─── one channel for the scene, one per axis slot
//!       │
//!       ▼
//!   Controller::sync() ──► data window recheck ──► lazy formatter refresh
//!       │
//!       ▼
//!   RenderUpdate ... ──► Renderer::apply()      (same thread)
//!                   └──► SyncBatch ──► hand-off (render thread)
//! ```
//!
//! **[`dirty`]**: Channel constants, tracked property keys and the
//! [`ChangeTracker`](dirty::ChangeTracker) built on `understory_dirty`.
//!
//! **[`axis`]**: Category and value axes with validation, their
//! [`ValueAxisFormatter`](axis::ValueAxisFormatter) and printf-style label
//! formatting.
//!
//! **[`theme`]**: Field-granular theme model with one dirty bit per field
//! and a one-directional [`ThemeDelta`](theme::ThemeDelta) sync.
//!
//! **[`controller`]**: The [`Controller`](controller::Controller) that owns
//! axes, theme and scene state and runs the sync pass.
//!
//! **[`renderer`]**: The [`Renderer`](renderer::Renderer) contract and the
//! [`RenderUpdate`](renderer::RenderUpdate) values a sync pass produces.
//!
//! **[`camera`]** and **[`input`]**: Camera rotation and presets, and the
//! pointer / wheel state machine that drives them. Not part of the sync
//! protocol.
//!
//! **[`data`]**: The [`DataProxy`](data::DataProxy) contract used to derive
//! category labels and auto-adjusted ranges.
//!
//! **[`trace`]**: [`SyncSink`](trace::SyncSink) trait and event types for
//! sync-pass instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod axis;
pub mod camera;
pub mod controller;
pub mod data;
pub mod dirty;
pub mod error;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod trace;
