// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded sync traces.
//!
//! [`export`] reads bytes recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes them as a JSON
//! array with one object per event, ready for ad-hoc tooling (`jq`, notebooks,
//! test fixtures).

use std::io::{self, Write};

use serde_json::{Value, json};
use trellis_core::axis::AxisOrientation;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
///
/// Every object has an `"event"` name and a `"pass"` index; the other keys
/// depend on the event.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|recorded| event_json(&recorded)).collect();
    serde_json::to_writer_pretty(&mut *writer, &Value::Array(events))?;
    writeln!(writer)
}

fn event_json(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::SyncBegin(e) => json!({
            "event": "sync_begin",
            "pass": e.pass_index,
            "data_dirty": e.data_dirty,
        }),
        RecordedEvent::Update(e) => json!({
            "event": "update",
            "pass": e.pass_index,
            "kind": e.kind.name(),
            "axis": axis_json(e.orientation),
        }),
        RecordedEvent::SyncSummary(s) => json!({
            "event": "sync_summary",
            "pass": s.pass_index,
            "scene_updates": s.scene_updates,
            "axis_updates": s.axis_updates,
            "labels_regenerated": s.labels_regenerated,
            "data_rechecked": s.data_rechecked,
        }),
        RecordedEvent::SyncSkipped(e) => json!({
            "event": "sync_skipped",
            "pass": e.pass_index,
            "pending": e.pending,
        }),
    }
}

fn axis_json(orientation: AxisOrientation) -> Value {
    match orientation {
        AxisOrientation::None => Value::Null,
        AxisOrientation::X => json!("x"),
        AxisOrientation::Y => json!("y"),
        AxisOrientation::Z => json!("z"),
    }
}
