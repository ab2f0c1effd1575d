// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph controller.
//!
//! A [`Controller`] owns the three axis slots, the theme, the camera helper
//! and every scene property of one graph instance. Each setter stores the new
//! value, marks exactly the dirty key of that property and fires the change
//! listener; nothing reaches a renderer until the next sync pass.
//!
//! Axes and the theme are mutated through guards returned by
//! [`Controller::axis_mut`] and [`Controller::theme_mut`]. A guard borrows the
//! controller's bookkeeping next to the object it wraps and turns the
//! object's recorded changes into dirty keys when it is dropped, so no
//! callback or shared pointer ties an axis back to its owner.
//!
//! The pass itself lives in the `sync` submodule: see [`Controller::sync`]
//! and [`Controller::take_sync_batch`].

mod config;
mod sync;

pub use config::{ControllerConfig, GraphKind, LabelStyle, SelectionMode, ShadowQuality};

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::ops::{Deref, DerefMut};

use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, warn};

use crate::axis::{Axis, AxisChange, AxisId, AxisOrientation, AxisType};
use crate::camera::{
    CameraHelper, CameraPreset, DEFAULT_HORIZONTAL_ROTATION, DEFAULT_VERTICAL_ROTATION,
};
use crate::data::DataProxy;
use crate::dirty::{AxisProperty, ChangeTracker, SceneProperty};
use crate::theme::{Font, Theme, ThemeType};

/// Observer fired after every mutation that needs a render.
///
/// The notification carries no payload: it only tells the embedder to
/// schedule a frame. Any `FnMut() + Send` closure is a listener.
pub trait ChangeListener: Send {
    /// Called after a mutation.
    fn changed(&mut self);
}

impl<F: FnMut() + Send> ChangeListener for F {
    fn changed(&mut self) {
        self();
    }
}

/// Controller bookkeeping, split from the axis slots so a guard can borrow
/// one axis and the tracker at the same time.
struct SceneState {
    kind: GraphKind,
    tracker: ChangeTracker,
    theme: Theme,
    camera: CameraHelper,
    data: Option<Box<dyn DataProxy>>,
    data_dirty: bool,
    listener: Option<Box<dyn ChangeListener>>,
    bounding_rect: Rect,
    selection_mode: SelectionMode,
    shadow_quality: ShadowQuality,
    label_style: LabelStyle,
    font: Font,
    mesh_file_name: String,
    grid_enabled: bool,
    background_enabled: bool,
    pass_index: u64,
}

impl SceneState {
    fn notify(&mut self) {
        if let Some(listener) = &mut self.listener {
            listener.changed();
        }
    }

    fn mark(&mut self, property: SceneProperty) {
        self.tracker.mark_scene(property);
        self.notify();
    }

    /// Turns the changes recorded by `axis` into dirty keys. Returns `true`
    /// if there were any.
    fn record_axis_changes(&mut self, axis: &mut Axis) -> bool {
        let mut any = false;
        loop {
            let changes = axis.take_changes();
            if changes.is_empty() {
                return any;
            }
            any = true;
            for change in changes {
                self.apply_axis_change(axis, change);
            }
        }
    }

    fn apply_axis_change(&mut self, axis: &mut Axis, change: AxisChange) {
        let orientation = axis.orientation();
        let is_value = axis.axis_type() == AxisType::Value;
        let tracker = &mut self.tracker;
        match change {
            AxisChange::Type => {
                tracker.mark_axis_all(orientation);
                self.data_dirty = true;
            }
            AxisChange::Title => tracker.mark_axis(orientation, AxisProperty::Title),
            AxisChange::Labels => {
                tracker.mark_axis(orientation, AxisProperty::Labels);
                if !is_value && !axis.labels_explicitly_set() {
                    self.derive_labels(axis);
                }
            }
            AxisChange::Range => {
                tracker.mark_axis(orientation, AxisProperty::Range);
                if is_value {
                    tracker.mark_axis(orientation, AxisProperty::Formatter);
                }
                self.data_dirty = true;
            }
            AxisChange::SegmentCount => {
                tracker.mark_axis(orientation, AxisProperty::SegmentCount);
                tracker.mark_axis(orientation, AxisProperty::Formatter);
                self.data_dirty = true;
            }
            AxisChange::SubSegmentCount => {
                tracker.mark_axis(orientation, AxisProperty::SubSegmentCount);
                tracker.mark_axis(orientation, AxisProperty::Formatter);
                self.data_dirty = true;
            }
            AxisChange::AutoAdjustRange => {
                if axis.auto_adjust_range() {
                    self.data_dirty = true;
                }
            }
            AxisChange::LabelFormat => tracker.mark_axis(orientation, AxisProperty::LabelFormat),
            AxisChange::Formatter => tracker.mark_axis(orientation, AxisProperty::Formatter),
        }
    }

    /// Pulls labels for `axis` from the data proxy, if it has any for the
    /// axis slot.
    fn derive_labels(&self, axis: &mut Axis) -> bool {
        let Some(data) = self.data.as_deref() else {
            return false;
        };
        data_labels(data, axis.orientation()).is_some_and(|labels| axis.set_data_labels(labels))
    }
}

/// Labels a data proxy provides for an axis slot: rows along X, columns
/// along Z.
fn data_labels(data: &dyn DataProxy, orientation: AxisOrientation) -> Option<&[String]> {
    match orientation {
        AxisOrientation::X => Some(data.row_labels()),
        AxisOrientation::Z => Some(data.column_labels()),
        AxisOrientation::Y | AxisOrientation::None => None,
    }
}

/// Owner of one graph's axes, theme, camera and scene properties.
///
/// ```
/// use trellis_core::axis::AxisOrientation;
/// use trellis_core::controller::{Controller, ControllerConfig};
/// use trellis_core::data::BarDataProxy;
///
/// let mut controller = Controller::new(ControllerConfig::bars());
/// let mut data = BarDataProxy::new();
/// data.add_row("Mon", vec![1.0, 2.0]);
/// data.add_row("Tue", vec![3.0, 4.0]);
/// controller.set_data_proxy(data);
///
/// let batch = controller.take_sync_batch();
/// assert!(!batch.is_empty());
/// let x = controller.axis(AxisOrientation::X).unwrap();
/// assert_eq!(x.labels(), ["Mon", "Tue"]);
/// ```
pub struct Controller {
    axes: [Option<Axis>; 3],
    scene: SceneState,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("kind", &self.scene.kind)
            .field("axes", &self.axes)
            .field("bounding_rect", &self.scene.bounding_rect)
            .field("zoom_level", &self.scene.camera.zoom_level())
            .field("tracker", &self.scene.tracker)
            .field("data_dirty", &self.scene.data_dirty)
            .field("pass_index", &self.scene.pass_index)
            .finish_non_exhaustive()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl Controller {
    /// Creates a controller with a default axis in every slot.
    ///
    /// Every scene property, every theme field and every axis property
    /// starts dirty, so the first sync pass pushes the full state.
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        let mut theme = Theme::new(config.theme_type);
        theme.mark_all_dirty();
        let mut camera = CameraHelper::new();
        camera.set_zoom_level(config.zoom_level);
        let mut tracker = ChangeTracker::new();
        for property in SceneProperty::ALL {
            tracker.mark_scene(property);
        }

        let mut controller = Self {
            axes: [None, None, None],
            scene: SceneState {
                kind: config.kind,
                tracker,
                theme,
                camera,
                data: None,
                data_dirty: true,
                listener: None,
                bounding_rect: Rect::ZERO,
                selection_mode: config.selection_mode,
                shadow_quality: config.shadow_quality,
                label_style: config.label_style,
                font: Font::default(),
                mesh_file_name: String::new(),
                grid_enabled: config.grid_enabled,
                background_enabled: config.background_enabled,
                pass_index: 0,
            },
        };
        for (orientation, axis_type) in AxisOrientation::SLOTS.into_iter().zip(config.axis_types) {
            controller.set_axis(orientation, Axis::new(axis_type));
        }
        controller
    }

    /// The graph kind.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.scene.kind
    }

    /// Installs the change listener, replacing any previous one.
    pub fn set_change_listener(&mut self, listener: impl ChangeListener + 'static) {
        self.scene.listener = Some(Box::new(listener));
    }

    /// Removes the change listener.
    pub fn clear_change_listener(&mut self) {
        self.scene.listener = None;
    }

    /// Returns `true` if the next sync pass has anything to do.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.scene.tracker.is_clean() || self.scene.data_dirty
    }

    /// Number of sync passes run so far.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.scene.pass_index
    }

    // -- Axes --

    /// The axis in a slot.
    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation) -> Option<&Axis> {
        self.axes[orientation.slot()?].as_ref()
    }

    /// Mutable access to the axis in a slot.
    ///
    /// The returned guard records the axis's changes as dirty keys when it
    /// is dropped.
    #[must_use]
    pub fn axis_mut(&mut self, orientation: AxisOrientation) -> Option<AxisMut<'_>> {
        let axis = self.axes[orientation.slot()?].as_mut()?;
        Some(AxisMut {
            axis,
            scene: &mut self.scene,
        })
    }

    /// Attaches `axis` to a slot, destroying the previous occupant.
    ///
    /// The axis is stamped with the slot's orientation and every one of its
    /// properties is marked dirty, so the next pass pushes its full state.
    /// Category axes without explicit labels take theirs from the data
    /// proxy.
    ///
    /// # Panics
    ///
    /// Panics if `orientation` is [`AxisOrientation::None`].
    pub fn set_axis(&mut self, orientation: AxisOrientation, mut axis: Axis) {
        let Some(slot) = orientation.slot() else {
            panic!("an axis can only be attached to the X, Y or Z slot");
        };
        if let Some(previous) = self.axes[slot].take() {
            debug!(
                ?orientation,
                previous = ?previous.id(),
                replacement = ?axis.id(),
                "replacing axis"
            );
        }
        axis.set_orientation(orientation);
        _ = axis.take_changes();
        if axis.axis_type() == AxisType::Category && !axis.labels_explicitly_set() {
            self.scene.derive_labels(&mut axis);
            _ = axis.take_changes();
        }
        self.scene.tracker.mark_axis_all(orientation);
        self.scene.data_dirty = true;
        self.axes[slot] = Some(axis);
        self.scene.notify();
    }

    /// Accepts a change notification routed by axis id.
    ///
    /// Notifications for an axis that is not in one of the slots (for
    /// example one that was just replaced) are logged and ignored.
    pub fn handle_axis_changed(&mut self, id: AxisId, change: AxisChange) {
        let Some(axis) = self.axes.iter_mut().flatten().find(|axis| axis.id() == id) else {
            warn!(?id, ?change, "change notification for an axis that is not attached");
            return;
        };
        self.scene.apply_axis_change(axis, change);
        self.scene.notify();
    }

    // -- Theme --

    /// The theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.scene.theme
    }

    /// Mutable access to the theme.
    ///
    /// The returned guard marks the theme dirty on drop if any field changed.
    #[must_use]
    pub fn theme_mut(&mut self) -> ThemeMut<'_> {
        let revision = self.scene.theme.revision();
        ThemeMut {
            scene: &mut self.scene,
            revision,
        }
    }

    /// Replaces the theme. Every field is pushed on the next pass.
    pub fn set_theme(&mut self, mut theme: Theme) {
        theme.mark_all_dirty();
        self.scene.theme = theme;
        self.scene.mark(SceneProperty::Theme);
    }

    /// Applies a theme preset.
    pub fn set_theme_type(&mut self, theme_type: ThemeType) {
        self.theme_mut().set_type(theme_type);
    }

    // -- Bounding rect --

    /// The bounding rect.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        self.scene.bounding_rect
    }

    /// Replaces the bounding rect.
    pub fn set_bounding_rect(&mut self, rect: Rect) {
        if self.scene.bounding_rect != rect {
            self.scene.bounding_rect = rect;
            self.scene.mark(SceneProperty::BoundingRect);
        }
    }

    /// Moves the bounding rect, keeping its size.
    pub fn set_position(&mut self, origin: Point) {
        let rect = self.scene.bounding_rect.with_origin(origin);
        if self.scene.bounding_rect != rect {
            self.scene.bounding_rect = rect;
            self.scene.mark(SceneProperty::Position);
        }
    }

    /// Moves the left edge, keeping the size.
    pub fn set_x(&mut self, x: f64) {
        self.set_position(Point::new(x, self.scene.bounding_rect.y0));
    }

    /// Moves the top edge, keeping the size.
    pub fn set_y(&mut self, y: f64) {
        self.set_position(Point::new(self.scene.bounding_rect.x0, y));
    }

    /// Resizes the bounding rect, keeping its origin.
    pub fn set_size(&mut self, size: Size) {
        let rect = self.scene.bounding_rect.with_size(size);
        if self.scene.bounding_rect != rect {
            self.scene.bounding_rect = rect;
            self.scene.mark(SceneProperty::BoundingRect);
        }
    }

    /// Sets the width, keeping origin and height.
    pub fn set_width(&mut self, width: f64) {
        self.set_size(Size::new(width, self.scene.bounding_rect.height()));
    }

    /// Sets the height, keeping origin and width.
    pub fn set_height(&mut self, height: f64) {
        self.set_size(Size::new(self.scene.bounding_rect.width(), height));
    }

    // -- Camera --

    /// The camera helper.
    #[must_use]
    pub fn camera(&self) -> &CameraHelper {
        &self.scene.camera
    }

    /// Zoom level in percent.
    #[must_use]
    pub fn zoom_level(&self) -> i32 {
        self.scene.camera.zoom_level()
    }

    /// Sets the zoom level, clamped to `[10, 500]`.
    pub fn set_zoom_level(&mut self, zoom_level: i32) {
        if self.scene.camera.set_zoom_level(zoom_level) {
            self.scene.mark(SceneProperty::ZoomLevel);
        }
    }

    /// Sets camera rotation and zoom level, both clamped.
    ///
    /// `rotation.x` is the horizontal rotation, `rotation.y` the vertical one,
    /// in degrees.
    pub fn set_camera_position(&mut self, rotation: Vec2, zoom_level: i32) {
        let previous_zoom = self.scene.camera.zoom_level();
        if !self.scene.camera.set_position(rotation, zoom_level) {
            return;
        }
        if self.scene.camera.zoom_level() != previous_zoom {
            self.scene.mark(SceneProperty::ZoomLevel);
        } else {
            self.scene.notify();
        }
    }

    /// Moves the camera to a preset.
    pub fn set_camera_preset(&mut self, preset: CameraPreset) {
        if self.scene.camera.set_preset(preset) {
            self.scene.notify();
        }
    }

    /// Rotates the camera by a pointer drag and returns the new rotation.
    pub fn rotate_camera(&mut self, delta: Vec2) -> Vec2 {
        let rotation = self.scene.camera.rotate_by_drag(delta);
        self.scene.notify();
        rotation
    }

    /// Returns the camera to its default rotation, keeping the zoom level.
    pub fn reset_camera(&mut self) {
        let zoom_level = self.scene.camera.zoom_level();
        self.set_camera_position(
            Vec2::new(DEFAULT_HORIZONTAL_ROTATION, DEFAULT_VERTICAL_ROTATION),
            zoom_level,
        );
    }

    // -- Scene properties --

    /// Selection mode.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.scene.selection_mode
    }

    /// Sets the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.scene.selection_mode != mode {
            self.scene.selection_mode = mode;
            self.scene.mark(SceneProperty::SelectionMode);
        }
    }

    /// Shadow quality.
    #[must_use]
    pub fn shadow_quality(&self) -> ShadowQuality {
        self.scene.shadow_quality
    }

    /// Sets the shadow quality.
    pub fn set_shadow_quality(&mut self, quality: ShadowQuality) {
        if self.scene.shadow_quality != quality {
            self.scene.shadow_quality = quality;
            self.scene.mark(SceneProperty::ShadowQuality);
        }
    }

    /// Label style.
    #[must_use]
    pub fn label_style(&self) -> LabelStyle {
        self.scene.label_style
    }

    /// Sets the label style.
    pub fn set_label_style(&mut self, style: LabelStyle) {
        if self.scene.label_style != style {
            self.scene.label_style = style;
            self.scene.mark(SceneProperty::LabelStyle);
        }
    }

    /// Label font.
    #[must_use]
    pub fn font(&self) -> &Font {
        &self.scene.font
    }

    /// Sets the label font.
    pub fn set_font(&mut self, font: Font) {
        if self.scene.font != font {
            self.scene.font = font;
            self.scene.mark(SceneProperty::Font);
        }
    }

    /// Sets the point size of the label font.
    pub fn set_font_size(&mut self, point_size: f32) {
        if self.scene.font.point_size != point_size {
            self.scene.font.point_size = point_size;
            self.scene.mark(SceneProperty::Font);
        }
    }

    /// Object mesh file name.
    #[must_use]
    pub fn mesh_file_name(&self) -> &str {
        &self.scene.mesh_file_name
    }

    /// Sets the object mesh file name.
    pub fn set_mesh_file_name(&mut self, file_name: impl Into<String>) {
        let file_name = file_name.into();
        if self.scene.mesh_file_name != file_name {
            self.scene.mesh_file_name = file_name;
            self.scene.mark(SceneProperty::MeshFileName);
        }
    }

    /// Whether the grid is drawn.
    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.scene.grid_enabled
    }

    /// Shows or hides the grid.
    pub fn set_grid_enabled(&mut self, enabled: bool) {
        if self.scene.grid_enabled != enabled {
            self.scene.grid_enabled = enabled;
            self.scene.mark(SceneProperty::GridEnabled);
        }
    }

    /// Whether the background is drawn.
    #[must_use]
    pub fn background_enabled(&self) -> bool {
        self.scene.background_enabled
    }

    /// Shows or hides the background.
    pub fn set_background_enabled(&mut self, enabled: bool) {
        if self.scene.background_enabled != enabled {
            self.scene.background_enabled = enabled;
            self.scene.mark(SceneProperty::BackgroundEnabled);
        }
    }

    // -- Data --

    /// The attached data proxy.
    #[must_use]
    pub fn data_proxy(&self) -> Option<&dyn DataProxy> {
        self.scene.data.as_deref()
    }

    /// Attaches a data proxy, replacing any previous one.
    ///
    /// Category labels and auto-adjusted ranges follow the new data from the
    /// next sync pass on.
    pub fn set_data_proxy(&mut self, data: impl DataProxy + 'static) {
        self.scene.data = Some(Box::new(data));
        self.mark_data_changed();
    }

    /// Detaches the data proxy. Labels and ranges keep their last values.
    pub fn clear_data_proxy(&mut self) {
        self.scene.data = None;
    }

    /// Forces a data-window recheck on the next pass.
    pub fn mark_data_changed(&mut self) {
        self.scene.data_dirty = true;
        self.scene.notify();
    }
}

/// Mutable access to an attached axis.
///
/// Dereferences to [`Axis`]. On drop the axis's recorded changes become
/// dirty keys and the change listener fires once.
pub struct AxisMut<'a> {
    axis: &'a mut Axis,
    scene: &'a mut SceneState,
}

impl fmt::Debug for AxisMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisMut")
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

impl Deref for AxisMut<'_> {
    type Target = Axis;

    fn deref(&self) -> &Axis {
        self.axis
    }
}

impl DerefMut for AxisMut<'_> {
    fn deref_mut(&mut self) -> &mut Axis {
        self.axis
    }
}

impl Drop for AxisMut<'_> {
    fn drop(&mut self) {
        if self.scene.record_axis_changes(self.axis) {
            self.scene.notify();
        }
    }
}

/// Mutable access to the controller's theme.
///
/// Dereferences to [`Theme`]. On drop, marks the theme dirty if any field
/// changed.
pub struct ThemeMut<'a> {
    scene: &'a mut SceneState,
    revision: u64,
}

impl fmt::Debug for ThemeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeMut")
            .field("theme", &self.scene.theme)
            .finish_non_exhaustive()
    }
}

impl Deref for ThemeMut<'_> {
    type Target = Theme;

    fn deref(&self) -> &Theme {
        &self.scene.theme
    }
}

impl DerefMut for ThemeMut<'_> {
    fn deref_mut(&mut self) -> &mut Theme {
        &mut self.scene.theme
    }
}

impl Drop for ThemeMut<'_> {
    fn drop(&mut self) {
        if self.scene.theme.revision() != self.revision {
            self.scene.mark(SceneProperty::Theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::camera::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
    use crate::data::BarDataProxy;
    use crate::theme::ThemeField;

    fn synced(config: ControllerConfig) -> Controller {
        let mut controller = Controller::new(config);
        _ = controller.take_sync_batch();
        controller
    }

    #[test]
    fn zoom_is_clamped() {
        let mut controller = synced(ControllerConfig::bars());
        controller.set_zoom_level(1000);
        assert_eq!(controller.zoom_level(), MAX_ZOOM_LEVEL);
        controller.set_zoom_level(-5);
        assert_eq!(controller.zoom_level(), MIN_ZOOM_LEVEL);
    }

    #[test]
    fn camera_position_is_clamped() {
        let mut controller = synced(ControllerConfig::scatter());
        controller.set_camera_position(Vec2::new(-400.0, 120.0), 2);
        assert_eq!(controller.camera().rotation(), Vec2::new(-180.0, 90.0));
        assert_eq!(controller.zoom_level(), MIN_ZOOM_LEVEL);
        assert!(controller.has_pending_changes());

        controller.reset_camera();
        assert_eq!(
            controller.camera().rotation(),
            Vec2::new(DEFAULT_HORIZONTAL_ROTATION, DEFAULT_VERTICAL_ROTATION)
        );
    }

    #[test]
    fn unchanged_values_mark_nothing() {
        let mut controller = synced(ControllerConfig::bars());
        controller.set_selection_mode(SelectionMode::Item);
        controller.set_grid_enabled(true);
        controller.set_font(Font::default());
        controller.set_zoom_level(controller.zoom_level());
        assert!(!controller.has_pending_changes());
    }

    #[test]
    fn listener_fires_on_mutation() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut controller = synced(ControllerConfig::bars());
        controller.set_change_listener(move || {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        controller.set_shadow_quality(ShadowQuality::High);
        controller.set_shadow_quality(ShadowQuality::High);
        if let Some(mut y) = controller.axis_mut(AxisOrientation::Y) {
            y.set_title("Revenue");
            y.set_segment_count(4).unwrap();
        }
        controller.set_camera_preset(CameraPreset::Left);
        assert_eq!(count.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn category_labels_follow_data() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![1.0]);
        data.add_row("Tue", vec![2.0]);
        data.set_column_labels(vec![String::from("Sales")]);
        controller.set_data_proxy(data);
        _ = controller.take_sync_batch();

        let x = controller.axis(AxisOrientation::X).unwrap();
        assert_eq!(x.labels(), ["Mon", "Tue"]);
        let z = controller.axis(AxisOrientation::Z).unwrap();
        assert_eq!(z.labels(), ["Sales"]);
    }

    #[test]
    fn attached_axis_takes_data_labels_immediately() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![1.0]);
        data.add_row("Tue", vec![2.0]);
        controller.set_data_proxy(data);

        controller.set_axis(AxisOrientation::X, Axis::category());
        let x = controller.axis(AxisOrientation::X).unwrap();
        assert_eq!(x.labels(), ["Mon", "Tue"]);
        assert_eq!(x.orientation(), AxisOrientation::X);
    }

    #[test]
    fn explicit_labels_win_over_data() {
        let mut controller = Controller::new(ControllerConfig::bars());
        if let Some(mut x) = controller.axis_mut(AxisOrientation::X) {
            x.set_labels(vec![String::from("Q1")]).unwrap();
        }
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![1.0]);
        controller.set_data_proxy(data);
        _ = controller.take_sync_batch();
        assert_eq!(controller.axis(AxisOrientation::X).unwrap().labels(), ["Q1"]);

        // Clearing explicit labels hands the axis back to the data.
        if let Some(mut x) = controller.axis_mut(AxisOrientation::X) {
            x.set_labels(vec![]).unwrap();
        }
        assert_eq!(controller.axis(AxisOrientation::X).unwrap().labels(), ["Mon"]);
    }

    #[test]
    fn theme_guard_marks_theme_once_changed() {
        let mut controller = synced(ControllerConfig::bars());
        {
            let mut theme = controller.theme_mut();
            _ = theme.set_light_strength(15.0);
        }
        assert!(!controller.has_pending_changes());
        assert_eq!(controller.theme().light_strength(), 5.0);

        controller.theme_mut().set_grid_enabled(false);
        assert!(controller.has_pending_changes());
        assert!(controller.theme().is_dirty(ThemeField::GridEnabled));
    }

    #[test]
    fn orphan_notifications_are_ignored() {
        let mut controller = synced(ControllerConfig::bars());
        let old_id = controller.axis(AxisOrientation::Y).unwrap().id();
        controller.set_axis(AxisOrientation::Y, Axis::value());
        _ = controller.take_sync_batch();

        controller.handle_axis_changed(old_id, AxisChange::Title);
        assert!(!controller.has_pending_changes());

        let new_id = controller.axis(AxisOrientation::Y).unwrap().id();
        controller.handle_axis_changed(new_id, AxisChange::Title);
        assert!(controller.has_pending_changes());
    }

    #[test]
    fn geometry_setters_keep_the_other_half() {
        let mut controller = synced(ControllerConfig::surface());
        controller.set_bounding_rect(Rect::new(0.0, 0.0, 640.0, 480.0));
        controller.set_x(10.0);
        controller.set_height(200.0);
        assert_eq!(controller.bounding_rect(), Rect::new(10.0, 0.0, 650.0, 200.0));
    }

    #[test]
    #[should_panic(expected = "an axis can only be attached to the X, Y or Z slot")]
    fn attaching_without_orientation_panics() {
        let mut controller = Controller::default();
        controller.set_axis(AxisOrientation::None, Axis::value());
    }
}
