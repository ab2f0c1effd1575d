// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`SyncSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use trellis_core::axis::AxisOrientation;
use trellis_core::trace::{SyncBeginEvent, SyncSink, SyncSkippedEvent, SyncSummary, UpdateEvent};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Print one line per pushed update, not only pass boundaries.
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: true,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: true,
        }
    }

    /// Turns per-update lines on or off.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn axis_name(orientation: AxisOrientation) -> &'static str {
    match orientation {
        AxisOrientation::None => "scene",
        AxisOrientation::X => "x",
        AxisOrientation::Y => "y",
        AxisOrientation::Z => "z",
    }
}

impl<W: Write> SyncSink for PrettyPrintSink<W> {
    fn on_sync_begin(&mut self, e: &SyncBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[sync:begin] pass={}{}",
            e.pass_index,
            if e.data_dirty { " data-dirty" } else { "" },
        );
    }

    fn on_update(&mut self, e: &UpdateEvent) {
        if !self.verbose {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[update] pass={} {}.{}",
            e.pass_index,
            axis_name(e.orientation),
            e.kind.name(),
        );
    }

    fn on_sync_summary(&mut self, s: &SyncSummary) {
        let _ = writeln!(
            self.writer,
            "[sync:end] pass={} scene={} axes={} labels={}{}",
            s.pass_index,
            s.scene_updates,
            s.axis_updates,
            s.labels_regenerated,
            if s.data_rechecked { " rechecked" } else { "" },
        );
    }

    fn on_sync_skipped(&mut self, e: &SyncSkippedEvent) {
        let _ = writeln!(
            self.writer,
            "[sync:skipped] pass={} pending={}",
            e.pass_index, e.pending,
        );
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::controller::{Controller, ControllerConfig};
    use trellis_core::trace::Tracer;

    use super::*;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn one_line_per_event() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        let batch = controller.take_sync_batch_traced(&mut Tracer::new(&mut sink));

        let text = output(sink);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), batch.len() + 2);
        assert_eq!(lines[0], "[sync:begin] pass=0 data-dirty");
        assert!(lines.contains(&"[update] pass=0 scene.zoom_level"));
        assert!(lines.contains(&"[update] pass=0 y.axis_formatter"));
        assert!(lines[lines.len() - 1].starts_with("[sync:end] pass=0 "));
    }

    #[test]
    fn quiet_mode_prints_pass_boundaries_only() {
        let mut controller = Controller::new(ControllerConfig::surface());
        let mut sink = PrettyPrintSink::with_writer(Vec::new()).verbose(false);
        controller.sync_traced(None, &mut Tracer::new(&mut sink));
        let _ = controller.take_sync_batch_traced(&mut Tracer::new(&mut sink));
        let _ = controller.take_sync_batch_traced(&mut Tracer::new(&mut sink));

        assert_eq!(
            output(sink),
            "[sync:skipped] pass=0 pending=true\n\
             [sync:begin] pass=0 data-dirty\n\
             [sync:end] pass=0 scene=11 axes=24 labels=3 rechecked\n\
             [sync:begin] pass=1\n\
             [sync:end] pass=1 scene=0 axes=0 labels=0\n"
        );
    }
}
