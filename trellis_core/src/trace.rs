// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation for the sync pass.
//!
//! This module provides a [`SyncSink`] trait with per-event methods that the
//! controller's sync pass calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn SyncSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! [`SyncSummaryBuilder`] counts what a pass pushed and produces the
//! [`SyncSummary`] reported at its end.
//!
//! Plain diagnostics (rejected values, orphan notifications, axis
//! replacement) go through the `tracing` macros instead and need no sink.

use crate::axis::AxisOrientation;
use crate::renderer::UpdateKind;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a sync pass with a renderer starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Whether the data window will be rechecked in this pass.
    pub data_dirty: bool,
}

/// Emitted for every update a pass pushes, in push order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Which property was pushed.
    pub kind: UpdateKind,
    /// Target axis slot, or [`AxisOrientation::None`] for scene properties.
    pub orientation: AxisOrientation,
}

/// Emitted when a sync is requested without a renderer. Dirty state is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncSkippedEvent {
    /// Index the skipped pass would have had.
    pub pass_index: u64,
    /// Whether dirty keys are waiting for the next pass.
    pub pending: bool,
}

/// Per-pass summary produced by [`SyncSummaryBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Pass counter.
    pub pass_index: u64,
    /// Scene updates pushed.
    pub scene_updates: u32,
    /// Axis updates pushed, across all slots.
    pub axis_updates: u32,
    /// Value axes whose generated labels changed.
    pub labels_regenerated: u32,
    /// Whether the data window was rechecked.
    pub data_rechecked: bool,
}

impl SyncSummary {
    /// Total number of updates pushed.
    #[must_use]
    pub fn total_updates(&self) -> u32 {
        self.scene_updates + self.axis_updates
    }
}

// ---------------------------------------------------------------------------
// SyncSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the sync pass.
///
/// All methods have default no-op implementations.
pub trait SyncSink {
    /// Called when a pass starts.
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        _ = e;
    }

    /// Called for each pushed update.
    fn on_update(&mut self, e: &UpdateEvent) {
        _ = e;
    }

    /// Called with the summary when a pass ends.
    fn on_sync_summary(&mut self, s: &SyncSummary) {
        _ = s;
    }

    /// Called when a sync is requested without a renderer.
    fn on_sync_skipped(&mut self, e: &SyncSkippedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`SyncSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl SyncSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`SyncSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn SyncSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn SyncSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn SyncSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SyncBeginEvent`].
    #[inline]
    pub fn sync_begin(&mut self, e: &SyncBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sync_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UpdateEvent`].
    #[inline]
    pub fn update(&mut self, e: &UpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SyncSummary`].
    #[inline]
    pub fn sync_summary(&mut self, s: &SyncSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_sync_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`SyncSkippedEvent`].
    #[inline]
    pub fn sync_skipped(&mut self, e: &SyncSkippedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sync_skipped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// SyncSummaryBuilder
// ---------------------------------------------------------------------------

/// Counts the work of one pass and produces a [`SyncSummary`].
#[derive(Clone, Copy, Debug)]
pub struct SyncSummaryBuilder {
    summary: SyncSummary,
}

impl SyncSummaryBuilder {
    /// Starts a summary for the given pass.
    #[must_use]
    pub fn new(pass_index: u64) -> Self {
        Self {
            summary: SyncSummary {
                pass_index,
                ..SyncSummary::default()
            },
        }
    }

    /// Counts one pushed update.
    pub fn record(&mut self, e: &UpdateEvent) {
        if e.orientation == AxisOrientation::None {
            self.summary.scene_updates += 1;
        } else {
            self.summary.axis_updates += 1;
        }
    }

    /// Counts one value axis whose labels were regenerated.
    pub fn labels_regenerated(&mut self) {
        self.summary.labels_regenerated += 1;
    }

    /// Records that the data window was rechecked.
    pub fn data_rechecked(&mut self) {
        self.summary.data_rechecked = true;
    }

    /// Consumes the builder and produces the final [`SyncSummary`].
    #[must_use]
    pub fn finish(self) -> SyncSummary {
        self.summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
