// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`SyncSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, one tag byte followed by
//! the event fields. [`decode`] reads them back as an iterator of
//! [`RecordedEvent`].

use trellis_core::axis::AxisOrientation;
use trellis_core::renderer::UpdateKind;
use trellis_core::trace::{SyncBeginEvent, SyncSink, SyncSkippedEvent, SyncSummary, UpdateEvent};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SYNC_BEGIN: u8 = 1;
const TAG_UPDATE: u8 = 2;
const TAG_SYNC_SUMMARY: u8 = 3;
const TAG_SYNC_SKIPPED: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`SyncSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_orientation(&mut self, o: AxisOrientation) {
        self.write_u8(match o {
            AxisOrientation::None => 0,
            AxisOrientation::X => 1,
            AxisOrientation::Y => 2,
            AxisOrientation::Z => 3,
        });
    }
}

impl SyncSink for RecorderSink {
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        self.write_u8(TAG_SYNC_BEGIN);
        self.write_u64(e.pass_index);
        self.write_bool(e.data_dirty);
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        self.write_u8(TAG_UPDATE);
        self.write_u64(e.pass_index);
        self.write_u8(e.kind as u8);
        self.write_orientation(e.orientation);
    }

    fn on_sync_summary(&mut self, s: &SyncSummary) {
        self.write_u8(TAG_SYNC_SUMMARY);
        self.write_u64(s.pass_index);
        self.write_u32(s.scene_updates);
        self.write_u32(s.axis_updates);
        self.write_u32(s.labels_regenerated);
        self.write_bool(s.data_rechecked);
    }

    fn on_sync_skipped(&mut self, e: &SyncSkippedEvent) {
        self.write_u8(TAG_SYNC_SKIPPED);
        self.write_u64(e.pass_index);
        self.write_bool(e.pending);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`SyncBeginEvent`].
    SyncBegin(SyncBeginEvent),
    /// An [`UpdateEvent`].
    Update(UpdateEvent),
    /// A [`SyncSummary`].
    SyncSummary(SyncSummary),
    /// A [`SyncSkippedEvent`].
    SyncSkipped(SyncSkippedEvent),
}

impl RecordedEvent {
    /// Pass counter of the event.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        match self {
            Self::SyncBegin(e) => e.pass_index,
            Self::Update(e) => e.pass_index,
            Self::SyncSummary(s) => s.pass_index,
            Self::SyncSkipped(e) => e.pass_index,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_orientation(&mut self) -> Option<AxisOrientation> {
        Some(match self.read_u8()? {
            1 => AxisOrientation::X,
            2 => AxisOrientation::Y,
            3 => AxisOrientation::Z,
            _ => AxisOrientation::None,
        })
    }

    fn decode_sync_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SyncBegin(SyncBeginEvent {
            pass_index: self.read_u64()?,
            data_dirty: self.read_bool()?,
        }))
    }

    fn decode_update(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Update(UpdateEvent {
            pass_index: self.read_u64()?,
            kind: UpdateKind::from_u8(self.read_u8()?)?,
            orientation: self.read_orientation()?,
        }))
    }

    fn decode_sync_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SyncSummary(SyncSummary {
            pass_index: self.read_u64()?,
            scene_updates: self.read_u32()?,
            axis_updates: self.read_u32()?,
            labels_regenerated: self.read_u32()?,
            data_rechecked: self.read_bool()?,
        }))
    }

    fn decode_sync_skipped(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SyncSkipped(SyncSkippedEvent {
            pass_index: self.read_u64()?,
            pending: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_SYNC_BEGIN => self.decode_sync_begin(),
            TAG_UPDATE => self.decode_update(),
            TAG_SYNC_SUMMARY => self.decode_sync_summary(),
            TAG_SYNC_SKIPPED => self.decode_sync_skipped(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
