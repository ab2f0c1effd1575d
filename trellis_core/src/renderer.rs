// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer contract.
//!
//! A sync pass turns every dirty key into one [`RenderUpdate`] carrying the
//! property's current value. Updates reach a render-side mirror in one of two
//! ways:
//!
//! - **Direct**: [`Controller::sync`](crate::controller::Controller::sync)
//!   calls [`Renderer::apply`] for each update, on the calling thread.
//! - **Batched**: [`Controller::take_sync_batch`](crate::controller::Controller::take_sync_batch)
//!   returns an owned [`SyncBatch`] that can be moved to the render thread
//!   and applied there with [`SyncBatch::apply_to`].
//!
//! Either way the data flow is one-directional: a renderer receives values
//! and never calls back into the controller.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame() {
//!     // Control side: mutate freely between frames.
//!     controller.set_zoom_level(250);
//!     controller.axis_mut(AxisOrientation::Y).map(|mut y| y.set_range(0.0, 50.0));
//!
//!     // Sync point: push every dirty property exactly once.
//!     controller.sync(Some(&mut cache));
//!
//!     // Render side: draw from the mirror.
//!     let (plan, damage) = cache.build_plan();
//!     if !damage.is_empty() {
//!         backend.draw(&plan);
//!     }
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::axis::{AxisOrientation, AxisType, ValueAxisFormatter};
use crate::controller::{LabelStyle, SelectionMode, ShadowQuality};
use crate::theme::{Font, ThemeDelta};

/// One property value pushed by a sync pass.
#[derive(Clone, Debug)]
pub enum RenderUpdate {
    /// Bounding rect moved (size unchanged).
    Position(Rect),
    /// Bounding rect resized.
    BoundingRect(Rect),
    /// Zoom level in percent.
    ZoomLevel(i32),
    /// Changed theme fields.
    Theme(ThemeDelta),
    /// Label font.
    Font(Font),
    /// Label background style.
    LabelStyle(LabelStyle),
    /// Shadow quality.
    ShadowQuality(ShadowQuality),
    /// Selection mode.
    SelectionMode(SelectionMode),
    /// Object mesh file name.
    MeshFileName(String),
    /// Grid visibility.
    GridEnabled(bool),
    /// Background visibility.
    BackgroundEnabled(bool),
    /// Axis type.
    AxisType(AxisOrientation, AxisType),
    /// Axis title.
    AxisTitle(AxisOrientation, String),
    /// Axis labels.
    AxisLabels(AxisOrientation, Vec<String>),
    /// Axis `(min, max)`.
    AxisRange(AxisOrientation, f32, f32),
    /// Axis segment count.
    AxisSegmentCount(AxisOrientation, u32),
    /// Axis subsegment count.
    AxisSubSegmentCount(AxisOrientation, u32),
    /// Axis label format.
    AxisLabelFormat(AxisOrientation, String),
    /// Detached copy of the axis formatter with current positions.
    AxisFormatter(AxisOrientation, ValueAxisFormatter),
}

impl RenderUpdate {
    /// Returns the payload-free kind of this update.
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        match self {
            Self::Position(_) => UpdateKind::Position,
            Self::BoundingRect(_) => UpdateKind::BoundingRect,
            Self::ZoomLevel(_) => UpdateKind::ZoomLevel,
            Self::Theme(_) => UpdateKind::Theme,
            Self::Font(_) => UpdateKind::Font,
            Self::LabelStyle(_) => UpdateKind::LabelStyle,
            Self::ShadowQuality(_) => UpdateKind::ShadowQuality,
            Self::SelectionMode(_) => UpdateKind::SelectionMode,
            Self::MeshFileName(_) => UpdateKind::MeshFileName,
            Self::GridEnabled(_) => UpdateKind::GridEnabled,
            Self::BackgroundEnabled(_) => UpdateKind::BackgroundEnabled,
            Self::AxisType(..) => UpdateKind::AxisType,
            Self::AxisTitle(..) => UpdateKind::AxisTitle,
            Self::AxisLabels(..) => UpdateKind::AxisLabels,
            Self::AxisRange(..) => UpdateKind::AxisRange,
            Self::AxisSegmentCount(..) => UpdateKind::AxisSegmentCount,
            Self::AxisSubSegmentCount(..) => UpdateKind::AxisSubSegmentCount,
            Self::AxisLabelFormat(..) => UpdateKind::AxisLabelFormat,
            Self::AxisFormatter(..) => UpdateKind::AxisFormatter,
        }
    }

    /// Returns the axis slot an axis update targets, or
    /// [`AxisOrientation::None`] for scene updates.
    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        match self {
            Self::AxisType(o, _)
            | Self::AxisTitle(o, _)
            | Self::AxisLabels(o, _)
            | Self::AxisRange(o, ..)
            | Self::AxisSegmentCount(o, _)
            | Self::AxisSubSegmentCount(o, _)
            | Self::AxisLabelFormat(o, _)
            | Self::AxisFormatter(o, _) => *o,
            _ => AxisOrientation::None,
        }
    }
}

/// Payload-free discriminant of a [`RenderUpdate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[expect(missing_docs, reason = "one variant per RenderUpdate variant")]
pub enum UpdateKind {
    Position = 0,
    BoundingRect = 1,
    ZoomLevel = 2,
    Theme = 3,
    Font = 4,
    LabelStyle = 5,
    ShadowQuality = 6,
    SelectionMode = 7,
    MeshFileName = 8,
    GridEnabled = 9,
    BackgroundEnabled = 10,
    AxisType = 11,
    AxisTitle = 12,
    AxisLabels = 13,
    AxisRange = 14,
    AxisSegmentCount = 15,
    AxisSubSegmentCount = 16,
    AxisLabelFormat = 17,
    AxisFormatter = 18,
}

impl UpdateKind {
    /// Every kind, in discriminant order.
    pub const ALL: [Self; 19] = [
        Self::Position,
        Self::BoundingRect,
        Self::ZoomLevel,
        Self::Theme,
        Self::Font,
        Self::LabelStyle,
        Self::ShadowQuality,
        Self::SelectionMode,
        Self::MeshFileName,
        Self::GridEnabled,
        Self::BackgroundEnabled,
        Self::AxisType,
        Self::AxisTitle,
        Self::AxisLabels,
        Self::AxisRange,
        Self::AxisSegmentCount,
        Self::AxisSubSegmentCount,
        Self::AxisLabelFormat,
        Self::AxisFormatter,
    ];

    /// Decodes a discriminant.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Short name, as used by the renderer method (`update_<name>`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::BoundingRect => "bounding_rect",
            Self::ZoomLevel => "zoom_level",
            Self::Theme => "theme",
            Self::Font => "font",
            Self::LabelStyle => "label_style",
            Self::ShadowQuality => "shadow_quality",
            Self::SelectionMode => "selection_mode",
            Self::MeshFileName => "mesh_file_name",
            Self::GridEnabled => "grid_enabled",
            Self::BackgroundEnabled => "background_enabled",
            Self::AxisType => "axis_type",
            Self::AxisTitle => "axis_title",
            Self::AxisLabels => "axis_labels",
            Self::AxisRange => "axis_range",
            Self::AxisSegmentCount => "axis_segment_count",
            Self::AxisSubSegmentCount => "axis_sub_segment_count",
            Self::AxisLabelFormat => "axis_label_format",
            Self::AxisFormatter => "axis_formatter",
        }
    }
}

/// Consumes the updates of a sync pass.
///
/// Each `update_*` method should be a cheap state copy that the draw step
/// reads on the next frame. Implementations never call back into the
/// controller.
pub trait Renderer {
    /// Bounding rect moved.
    fn update_position(&mut self, rect: Rect);
    /// Bounding rect resized.
    fn update_bounding_rect(&mut self, rect: Rect);
    /// Zoom level changed.
    fn update_zoom_level(&mut self, zoom_level: i32);
    /// Theme fields changed.
    fn update_theme(&mut self, delta: ThemeDelta);
    /// Label font changed.
    fn update_font(&mut self, font: Font);
    /// Label style changed.
    fn update_label_style(&mut self, style: LabelStyle);
    /// Shadow quality changed.
    fn update_shadow_quality(&mut self, quality: ShadowQuality);
    /// Selection mode changed.
    fn update_selection_mode(&mut self, mode: SelectionMode);
    /// Mesh file name changed.
    fn update_mesh_file_name(&mut self, file_name: String);
    /// Grid visibility changed.
    fn update_grid_enabled(&mut self, enabled: bool);
    /// Background visibility changed.
    fn update_background_enabled(&mut self, enabled: bool);
    /// Axis type changed.
    fn update_axis_type(&mut self, orientation: AxisOrientation, axis_type: AxisType);
    /// Axis title changed.
    fn update_axis_title(&mut self, orientation: AxisOrientation, title: String);
    /// Axis labels changed.
    fn update_axis_labels(&mut self, orientation: AxisOrientation, labels: Vec<String>);
    /// Axis range changed.
    fn update_axis_range(&mut self, orientation: AxisOrientation, min: f32, max: f32);
    /// Axis segment count changed.
    fn update_axis_segment_count(&mut self, orientation: AxisOrientation, count: u32);
    /// Axis subsegment count changed.
    fn update_axis_sub_segment_count(&mut self, orientation: AxisOrientation, count: u32);
    /// Axis label format changed.
    fn update_axis_label_format(&mut self, orientation: AxisOrientation, format: String);
    /// Axis formatter state changed.
    fn update_axis_formatter(&mut self, orientation: AxisOrientation, formatter: ValueAxisFormatter);

    /// Dispatches one update to the matching `update_*` method.
    fn apply(&mut self, update: RenderUpdate) {
        match update {
            RenderUpdate::Position(rect) => self.update_position(rect),
            RenderUpdate::BoundingRect(rect) => self.update_bounding_rect(rect),
            RenderUpdate::ZoomLevel(zoom) => self.update_zoom_level(zoom),
            RenderUpdate::Theme(delta) => self.update_theme(delta),
            RenderUpdate::Font(font) => self.update_font(font),
            RenderUpdate::LabelStyle(style) => self.update_label_style(style),
            RenderUpdate::ShadowQuality(quality) => self.update_shadow_quality(quality),
            RenderUpdate::SelectionMode(mode) => self.update_selection_mode(mode),
            RenderUpdate::MeshFileName(name) => self.update_mesh_file_name(name),
            RenderUpdate::GridEnabled(enabled) => self.update_grid_enabled(enabled),
            RenderUpdate::BackgroundEnabled(enabled) => self.update_background_enabled(enabled),
            RenderUpdate::AxisType(o, t) => self.update_axis_type(o, t),
            RenderUpdate::AxisTitle(o, title) => self.update_axis_title(o, title),
            RenderUpdate::AxisLabels(o, labels) => self.update_axis_labels(o, labels),
            RenderUpdate::AxisRange(o, min, max) => self.update_axis_range(o, min, max),
            RenderUpdate::AxisSegmentCount(o, n) => self.update_axis_segment_count(o, n),
            RenderUpdate::AxisSubSegmentCount(o, n) => self.update_axis_sub_segment_count(o, n),
            RenderUpdate::AxisLabelFormat(o, format) => self.update_axis_label_format(o, format),
            RenderUpdate::AxisFormatter(o, formatter) => self.update_axis_formatter(o, formatter),
        }
    }
}

/// The ordered updates of one sync pass, owned for cross-thread hand-off.
#[derive(Clone, Debug, Default)]
pub struct SyncBatch {
    pass_index: u64,
    updates: Vec<RenderUpdate>,
}

impl SyncBatch {
    pub(crate) fn new(pass_index: u64, updates: Vec<RenderUpdate>) -> Self {
        Self {
            pass_index,
            updates,
        }
    }

    /// Index of the sync pass that produced this batch.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    /// Returns `true` if the pass found nothing dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Number of updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// The updates, in push order.
    #[must_use]
    pub fn updates(&self) -> &[RenderUpdate] {
        &self.updates
    }

    /// Applies every update, in order.
    pub fn apply_to<R: Renderer + ?Sized>(self, renderer: &mut R) {
        for update in self.updates {
            renderer.apply(update);
        }
    }
}

impl IntoIterator for SyncBatch {
    type Item = RenderUpdate;
    type IntoIter = alloc::vec::IntoIter<RenderUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}
