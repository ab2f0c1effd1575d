// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sync pass.
//!
//! A pass runs in four steps:
//!
//! 1. If data is dirty, recheck the data window: derive category labels and
//!    follow the data with auto-adjusting ranges.
//! 2. Recalculate stale value-axis formatters and regenerate their labels.
//! 3. Drain the scene channel, then each axis channel, turning every drained
//!    key into one [`RenderUpdate`] that carries the current value.
//! 4. Hand the updates to the renderer, directly or as a [`SyncBatch`].
//!
//! Without a renderer nothing happens and every dirty key survives.

use alloc::vec::Vec;

use tracing::debug;

use super::{Controller, SceneState, data_labels};
use crate::axis::{Axis, AxisOrientation, AxisType};
use crate::dirty::{AxisProperty, SceneProperty};
use crate::renderer::{RenderUpdate, Renderer, SyncBatch};
use crate::trace::{SyncBeginEvent, SyncSkippedEvent, SyncSummaryBuilder, Tracer, UpdateEvent};

impl Controller {
    /// Pushes every dirty property to `renderer` and clears the dirty keys.
    ///
    /// Returns `true` if anything was pushed. With `None` the call is a no-op
    /// that keeps all dirty state for a later pass. A second call with no
    /// mutation in between pushes nothing.
    pub fn sync(&mut self, renderer: Option<&mut dyn Renderer>) -> bool {
        self.sync_traced(renderer, &mut Tracer::none())
    }

    /// Like [`sync`](Self::sync), reporting the pass to `tracer`.
    pub fn sync_traced(
        &mut self,
        renderer: Option<&mut dyn Renderer>,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let Some(renderer) = renderer else {
            let pass_index = self.scene.pass_index;
            debug!(pass_index, "sync skipped without a renderer");
            tracer.sync_skipped(&SyncSkippedEvent {
                pass_index,
                pending: self.has_pending_changes(),
            });
            return false;
        };
        let updates = self.run_pass(tracer);
        let pushed = !updates.is_empty();
        for update in updates {
            renderer.apply(update);
        }
        pushed
    }

    /// Drains every dirty property into an owned batch.
    ///
    /// The batch can be moved to the render thread and applied there with
    /// [`SyncBatch::apply_to`]. Applying batches in the order they were taken
    /// is equivalent to calling [`sync`](Self::sync) each time.
    #[must_use]
    pub fn take_sync_batch(&mut self) -> SyncBatch {
        self.take_sync_batch_traced(&mut Tracer::none())
    }

    /// Like [`take_sync_batch`](Self::take_sync_batch), reporting the pass
    /// to `tracer`.
    #[must_use]
    pub fn take_sync_batch_traced(&mut self, tracer: &mut Tracer<'_>) -> SyncBatch {
        let pass_index = self.scene.pass_index;
        let updates = self.run_pass(tracer);
        SyncBatch::new(pass_index, updates)
    }

    fn run_pass(&mut self, tracer: &mut Tracer<'_>) -> Vec<RenderUpdate> {
        let pass_index = self.scene.pass_index;
        self.scene.pass_index += 1;
        tracer.sync_begin(&SyncBeginEvent {
            pass_index,
            data_dirty: self.scene.data_dirty,
        });

        let mut summary = SyncSummaryBuilder::new(pass_index);
        if self.scene.data_dirty {
            self.recheck_data_window();
            summary.data_rechecked();
        }

        let Self { axes, scene } = self;
        for axis in axes.iter_mut().flatten() {
            if axis.recalculate_if_needed() {
                scene.tracker.mark_axis(axis.orientation(), AxisProperty::Labels);
                summary.labels_regenerated();
            }
        }

        let mut updates = Vec::new();
        for property in scene.tracker.drain_scene() {
            updates.extend(scene.scene_update(property));
        }
        for (axis, orientation) in axes.iter_mut().zip(AxisOrientation::SLOTS) {
            let properties = scene.tracker.drain_axis(orientation);
            let Some(axis) = axis else {
                continue;
            };
            for property in properties {
                updates.extend(axis_update(axis, property));
            }
        }

        for update in &updates {
            let event = UpdateEvent {
                pass_index,
                kind: update.kind(),
                orientation: update.orientation(),
            };
            summary.record(&event);
            tracer.update(&event);
        }
        let summary = summary.finish();
        debug!(
            pass_index,
            scene_updates = summary.scene_updates,
            axis_updates = summary.axis_updates,
            "sync pass"
        );
        tracer.sync_summary(&summary);
        updates
    }

    /// Brings category labels and auto-adjusting ranges in line with the
    /// data proxy.
    fn recheck_data_window(&mut self) {
        let Self { axes, scene } = self;
        if let Some(data) = scene.data.as_deref() {
            for axis in axes.iter_mut().flatten() {
                let orientation = axis.orientation();
                if let Some(labels) = data_labels(data, orientation) {
                    axis.set_data_labels(labels);
                }
                if !axis.auto_adjust_range() {
                    continue;
                }
                let Some((min, mut max)) = data.value_range(orientation) else {
                    continue;
                };
                if axis.axis_type() == AxisType::Value && max <= min {
                    max = min + 1.0;
                }
                axis.set_range_auto(min, max);
            }
        }
        for axis in axes.iter_mut().flatten() {
            scene.record_axis_changes(axis);
        }
        scene.data_dirty = false;
    }
}

impl SceneState {
    fn scene_update(&mut self, property: SceneProperty) -> Option<RenderUpdate> {
        let update = match property {
            SceneProperty::Position => RenderUpdate::Position(self.bounding_rect),
            SceneProperty::BoundingRect => RenderUpdate::BoundingRect(self.bounding_rect),
            SceneProperty::ZoomLevel => RenderUpdate::ZoomLevel(self.camera.zoom_level()),
            SceneProperty::Theme => {
                let delta = self.theme.take_delta();
                if delta.is_empty() {
                    return None;
                }
                RenderUpdate::Theme(delta)
            }
            SceneProperty::Font => RenderUpdate::Font(self.font.clone()),
            SceneProperty::LabelStyle => RenderUpdate::LabelStyle(self.label_style),
            SceneProperty::ShadowQuality => RenderUpdate::ShadowQuality(self.shadow_quality),
            SceneProperty::SelectionMode => RenderUpdate::SelectionMode(self.selection_mode),
            SceneProperty::MeshFileName => RenderUpdate::MeshFileName(self.mesh_file_name.clone()),
            SceneProperty::GridEnabled => RenderUpdate::GridEnabled(self.grid_enabled),
            SceneProperty::BackgroundEnabled => {
                RenderUpdate::BackgroundEnabled(self.background_enabled)
            }
        };
        Some(update)
    }
}

/// Builds the update for one drained axis key. Value-only keys drained from
/// a category axis produce nothing.
fn axis_update(axis: &mut Axis, property: AxisProperty) -> Option<RenderUpdate> {
    if property.is_value_only() && axis.axis_type() != AxisType::Value {
        return None;
    }
    let o = axis.orientation();
    let update = match property {
        AxisProperty::Type => RenderUpdate::AxisType(o, axis.axis_type()),
        AxisProperty::Title => RenderUpdate::AxisTitle(o, axis.title().into()),
        AxisProperty::Labels => RenderUpdate::AxisLabels(o, axis.labels().to_vec()),
        AxisProperty::Range => RenderUpdate::AxisRange(o, axis.min(), axis.max()),
        AxisProperty::SegmentCount => RenderUpdate::AxisSegmentCount(o, axis.segment_count()),
        AxisProperty::SubSegmentCount => {
            RenderUpdate::AxisSubSegmentCount(o, axis.sub_segment_count())
        }
        AxisProperty::LabelFormat => RenderUpdate::AxisLabelFormat(o, axis.label_format().into()),
        AxisProperty::Formatter => RenderUpdate::AxisFormatter(o, axis.formatter_snapshot()),
    };
    Some(update)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::*;
    use crate::axis::{LogMapping, ValueAxisFormatter};
    use crate::controller::ControllerConfig;
    use crate::data::BarDataProxy;
    use crate::renderer::UpdateKind;
    use crate::theme::{Font, ThemeDelta};

    /// Records every update it receives.
    #[derive(Debug, Default)]
    struct Recorder {
        updates: Vec<RenderUpdate>,
    }

    impl Recorder {
        fn kinds(&self) -> Vec<(UpdateKind, AxisOrientation)> {
            self.updates
                .iter()
                .map(|u| (u.kind(), u.orientation()))
                .collect()
        }

        fn count(&self, kind: UpdateKind, orientation: AxisOrientation) -> usize {
            self.kinds()
                .into_iter()
                .filter(|&k| k == (kind, orientation))
                .count()
        }
    }

    impl Renderer for Recorder {
        fn apply(&mut self, update: RenderUpdate) {
            self.updates.push(update);
        }
        fn update_position(&mut self, _: Rect) {}
        fn update_bounding_rect(&mut self, _: Rect) {}
        fn update_zoom_level(&mut self, _: i32) {}
        fn update_theme(&mut self, _: ThemeDelta) {}
        fn update_font(&mut self, _: Font) {}
        fn update_label_style(&mut self, _: crate::controller::LabelStyle) {}
        fn update_shadow_quality(&mut self, _: crate::controller::ShadowQuality) {}
        fn update_selection_mode(&mut self, _: crate::controller::SelectionMode) {}
        fn update_mesh_file_name(&mut self, _: String) {}
        fn update_grid_enabled(&mut self, _: bool) {}
        fn update_background_enabled(&mut self, _: bool) {}
        fn update_axis_type(&mut self, _: AxisOrientation, _: AxisType) {}
        fn update_axis_title(&mut self, _: AxisOrientation, _: String) {}
        fn update_axis_labels(&mut self, _: AxisOrientation, _: Vec<String>) {}
        fn update_axis_range(&mut self, _: AxisOrientation, _: f32, _: f32) {}
        fn update_axis_segment_count(&mut self, _: AxisOrientation, _: u32) {}
        fn update_axis_sub_segment_count(&mut self, _: AxisOrientation, _: u32) {}
        fn update_axis_label_format(&mut self, _: AxisOrientation, _: String) {}
        fn update_axis_formatter(&mut self, _: AxisOrientation, _: ValueAxisFormatter) {}
    }

    #[test]
    fn first_pass_pushes_everything_second_pushes_nothing() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut renderer = Recorder::default();
        assert!(controller.sync(Some(&mut renderer)));
        assert_eq!(renderer.count(UpdateKind::ZoomLevel, AxisOrientation::None), 1);
        assert_eq!(renderer.count(UpdateKind::Theme, AxisOrientation::None), 1);
        assert_eq!(renderer.count(UpdateKind::AxisType, AxisOrientation::X), 1);
        assert_eq!(renderer.count(UpdateKind::AxisFormatter, AxisOrientation::Y), 1);
        // Category axes get no value-only updates.
        assert_eq!(renderer.count(UpdateKind::AxisSegmentCount, AxisOrientation::X), 0);

        let mut second = Recorder::default();
        assert!(!controller.sync(Some(&mut second)));
        assert!(second.updates.is_empty());
    }

    #[test]
    fn sync_without_renderer_keeps_dirty_state() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        _ = controller.take_sync_batch();
        controller.set_zoom_level(1000);
        controller.set_grid_enabled(false);

        assert!(!controller.sync(None));
        assert!(!controller.sync(None));
        assert!(controller.has_pending_changes());
        assert_eq!(controller.pass_index(), 1);

        let mut renderer = Recorder::default();
        assert!(controller.sync(Some(&mut renderer)));
        assert_eq!(
            renderer.kinds(),
            [
                (UpdateKind::ZoomLevel, AxisOrientation::None),
                (UpdateKind::GridEnabled, AxisOrientation::None),
            ]
        );
        match &renderer.updates[0] {
            RenderUpdate::ZoomLevel(zoom) => assert_eq!(*zoom, 500),
            other => panic!("unexpected update {other:?}"),
        }
    }

    #[test]
    fn replacing_an_axis_pushes_its_full_state() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        _ = controller.take_sync_batch();

        let mut axis = Axis::value();
        axis.set_title("Depth");
        controller.set_axis(AxisOrientation::Z, axis);
        let batch = controller.take_sync_batch();
        let z_kinds: Vec<UpdateKind> = batch
            .updates()
            .iter()
            .filter(|u| u.orientation() == AxisOrientation::Z)
            .map(RenderUpdate::kind)
            .collect();
        for kind in [
            UpdateKind::AxisType,
            UpdateKind::AxisTitle,
            UpdateKind::AxisLabels,
            UpdateKind::AxisRange,
            UpdateKind::AxisSegmentCount,
            UpdateKind::AxisSubSegmentCount,
            UpdateKind::AxisLabelFormat,
            UpdateKind::AxisFormatter,
        ] {
            assert!(z_kinds.contains(&kind), "missing {kind:?}");
        }
        assert!(
            batch
                .updates()
                .iter()
                .all(|u| u.orientation() != AxisOrientation::X)
        );
    }

    #[test]
    fn range_change_pushes_range_formatter_and_labels() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        _ = controller.take_sync_batch();

        if let Some(mut y) = controller.axis_mut(AxisOrientation::Y) {
            y.set_range(0.0, 10.0).unwrap();
            y.set_range(0.0, 50.0).unwrap();
            assert!(!y.auto_adjust_range());
        }
        let batch = controller.take_sync_batch();
        let kinds: Vec<UpdateKind> = batch.updates().iter().map(RenderUpdate::kind).collect();
        assert_eq!(
            kinds,
            [
                UpdateKind::AxisLabels,
                UpdateKind::AxisRange,
                UpdateKind::AxisFormatter,
            ]
        );
        let formatter = batch.into_iter().find_map(|u| match u {
            RenderUpdate::AxisFormatter(_, f) => Some(f),
            _ => None,
        });
        let formatter = formatter.unwrap();
        assert!(!formatter.is_attached());
        assert_eq!(formatter.max(), 50.0);
        assert_eq!(formatter.grid_positions(), [0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(
            controller.axis(AxisOrientation::Y).unwrap().labels()[1],
            "10.00"
        );
    }

    #[test]
    fn auto_adjust_follows_data() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![4.0, 12.5]);
        data.add_row("Tue", vec![-2.0, 3.0]);
        controller.set_data_proxy(data);
        _ = controller.take_sync_batch();

        let y = controller.axis(AxisOrientation::Y).unwrap();
        assert_eq!((y.min(), y.max()), (-2.0, 12.5));
        assert!(y.auto_adjust_range());
        let x = controller.axis(AxisOrientation::X).unwrap();
        assert_eq!((x.min(), x.max()), (0.0, 1.0));
        assert!(!controller.has_pending_changes());
    }

    #[test]
    fn explicit_range_stops_following_data() {
        let mut controller = Controller::new(ControllerConfig::bars());
        if let Some(mut y) = controller.axis_mut(AxisOrientation::Y) {
            y.set_range(0.0, 100.0).unwrap();
        }
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![4.0]);
        controller.set_data_proxy(data);
        _ = controller.take_sync_batch();
        let y = controller.axis(AxisOrientation::Y).unwrap();
        assert_eq!((y.min(), y.max()), (0.0, 100.0));
    }

    #[test]
    fn theme_changes_are_deferred_to_the_next_pass() {
        let mut controller = Controller::new(ControllerConfig::bars());
        _ = controller.take_sync_batch();

        controller.theme_mut().set_light_strength(8.0).unwrap();
        controller.theme_mut().set_grid_enabled(false);
        let batch = controller.take_sync_batch();
        assert_eq!(batch.len(), 1);
        let Some(RenderUpdate::Theme(delta)) = batch.updates().first() else {
            panic!("expected a theme update");
        };
        assert_eq!(delta.len(), 2);
        assert!(!controller.theme().has_pending_changes());
    }

    #[test]
    fn label_format_change_regenerates_labels() {
        let mut controller = Controller::new(ControllerConfig::surface());
        _ = controller.take_sync_batch();
        if let Some(mut x) = controller.axis_mut(AxisOrientation::X) {
            x.set_label_format("%d m").unwrap();
        }
        let batch = controller.take_sync_batch();
        let labels = batch.updates().iter().find_map(|u| match u {
            RenderUpdate::AxisLabels(AxisOrientation::X, labels) => Some(labels.clone()),
            _ => None,
        });
        assert_eq!(
            labels.unwrap(),
            ["0 m", "2 m", "4 m", "6 m", "8 m", "10 m"]
        );
    }

    #[test]
    fn log_formatter_rejects_range_through_zero() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        _ = controller.take_sync_batch();
        let mut y = controller.axis_mut(AxisOrientation::Y).unwrap();
        assert!(
            y.set_formatter(ValueAxisFormatter::with_mapping(LogMapping::new()))
                .is_err()
        );
        y.set_range(1.0, 1000.0).unwrap();
        y.set_formatter(ValueAxisFormatter::with_mapping(LogMapping::new()))
            .unwrap();
        drop(y);

        let batch = controller.take_sync_batch();
        let formatter = batch.into_iter().find_map(|u| match u {
            RenderUpdate::AxisFormatter(_, f) => Some(f),
            _ => None,
        });
        let formatter = formatter.unwrap();
        assert!((formatter.position_at(10.0) - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn batches_carry_pass_index() {
        let mut controller = Controller::default();
        let first = controller.take_sync_batch();
        controller.set_mesh_file_name("bar.obj");
        let second = controller.take_sync_batch();
        assert_eq!(first.pass_index(), 0);
        assert_eq!(second.pass_index(), 1);
        assert_eq!(second.len(), 1);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_pass_reports_updates_and_summary() {
        use crate::trace::{SyncSink, SyncSummary};

        #[derive(Default)]
        struct Sink {
            updates: usize,
            summaries: Vec<SyncSummary>,
        }
        impl SyncSink for Sink {
            fn on_update(&mut self, _: &UpdateEvent) {
                self.updates += 1;
            }
            fn on_sync_summary(&mut self, s: &SyncSummary) {
                self.summaries.push(*s);
            }
        }

        let mut controller = Controller::new(ControllerConfig::bars());
        let mut sink = Sink::default();
        let batch = controller.take_sync_batch_traced(&mut Tracer::new(&mut sink));
        assert_eq!(sink.updates, batch.len());
        assert_eq!(sink.summaries.len(), 1);
        assert!(sink.summaries[0].data_rechecked);
        assert_eq!(
            sink.summaries[0].total_updates(),
            u32::try_from(batch.len()).unwrap()
        );
    }
}
