// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export of trellis sync traces.
//!
//! This crate provides [`SyncSink`](trellis_core::trace::SyncSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`recorder::RecorderSink`]: compact binary recording, read back with
//!   [`recorder::decode`].
//! - [`json::export`]: writes recorded bytes as a JSON array of events.

pub mod json;
pub mod pretty;
pub mod recorder;
