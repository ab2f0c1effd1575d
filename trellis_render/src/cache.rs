// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render-side mirror of controller state.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use kurbo::Rect;
use tracing::warn;
use trellis_core::axis::{AxisOrientation, AxisType, DEFAULT_LABEL_FORMAT, ValueAxisFormatter};
use trellis_core::camera::ONE_TO_ONE_ZOOM_LEVEL;
use trellis_core::controller::{LabelStyle, SelectionMode, ShadowQuality};
use trellis_core::renderer::Renderer;
use trellis_core::theme::{Font, Theme, ThemeDelta};

use crate::damage::DamageRegion;
use crate::plan::{RenderItem, RenderPlan};

/// Cached state of one axis slot.
#[derive(Clone, Debug)]
pub struct AxisCache {
    /// Category or value.
    pub axis_type: AxisType,
    /// Title.
    pub title: String,
    /// Label strings.
    pub labels: Vec<String>,
    /// Range minimum.
    pub min: f32,
    /// Range maximum.
    pub max: f32,
    /// Segment count (value axes).
    pub segment_count: u32,
    /// Subsegment count (value axes).
    pub sub_segment_count: u32,
    /// Label format (value axes).
    pub label_format: String,
    /// Detached formatter copy (value axes).
    pub formatter: ValueAxisFormatter,
}

impl Default for AxisCache {
    fn default() -> Self {
        Self {
            axis_type: AxisType::Category,
            title: String::new(),
            labels: Vec::new(),
            min: 0.0,
            max: 10.0,
            segment_count: 5,
            sub_segment_count: 1,
            label_format: String::from(DEFAULT_LABEL_FORMAT),
            formatter: ValueAxisFormatter::new(),
        }
    }
}

impl AxisCache {
    fn push_items(
        &self,
        orientation: AxisOrientation,
        theme: &Theme,
        grid: bool,
        items: &mut Vec<RenderItem>,
    ) {
        let line = theme.grid_line_color();
        let text = theme.label_text_color();
        match self.axis_type {
            AxisType::Value => {
                if grid {
                    items.extend(self.formatter.grid_positions().iter().map(|&position| {
                        RenderItem::GridLine {
                            orientation,
                            position,
                            color: line,
                        }
                    }));
                    items.extend(
                        self.formatter
                            .sub_grid_positions()
                            .iter()
                            .flatten()
                            .map(|&position| RenderItem::SubGridLine {
                                orientation,
                                position,
                                color: line,
                            }),
                    );
                }
                let positions = self.formatter.label_positions();
                items.extend(positions.iter().zip(&self.labels).map(|(&position, label)| {
                    RenderItem::Label {
                        orientation,
                        position,
                        text: label.clone(),
                        color: text,
                    }
                }));
            }
            AxisType::Category => {
                // Lines sit between bins, labels in their centers.
                let Ok(bins) = u16::try_from(self.labels.len()) else {
                    return;
                };
                if bins == 0 {
                    return;
                }
                let bins = f32::from(bins);
                if grid {
                    items.extend((0..=self.labels.len()).map(|i| RenderItem::GridLine {
                        orientation,
                        position: index_position(i, bins),
                        color: line,
                    }));
                }
                items.extend(self.labels.iter().enumerate().map(|(i, label)| {
                    RenderItem::Label {
                        orientation,
                        position: (index_position(i, bins) + index_position(i + 1, bins)) * 0.5,
                        text: label.clone(),
                        color: text,
                    }
                }));
            }
        }
    }
}

fn index_position(index: usize, bins: f32) -> f32 {
    let index = u16::try_from(index).map_or(bins, f32::from);
    (index / bins).min(1.0)
}

/// Render-owned copies of everything a frame needs.
///
/// Implements [`Renderer`]: every update is a plain state copy plus a damage
/// record. [`build_plan`](Self::build_plan) turns the current state into a
/// [`RenderPlan`] and hands out the damage accumulated since the previous
/// plan.
#[derive(Clone, Debug)]
pub struct RenderCache {
    bounding_rect: Rect,
    zoom_level: i32,
    theme: Theme,
    font: Font,
    label_style: LabelStyle,
    shadow_quality: ShadowQuality,
    selection_mode: SelectionMode,
    mesh_file_name: String,
    grid_enabled: bool,
    background_enabled: bool,
    axes: [AxisCache; 3],
    damage: DamageRegion,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderCache {
    /// Creates an empty cache. The first plan reports full damage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bounding_rect: Rect::ZERO,
            zoom_level: ONE_TO_ONE_ZOOM_LEVEL,
            theme: Theme::default(),
            font: Font::default(),
            label_style: LabelStyle::default(),
            shadow_quality: ShadowQuality::default(),
            selection_mode: SelectionMode::default(),
            mesh_file_name: String::new(),
            grid_enabled: true,
            background_enabled: true,
            axes: core::array::from_fn(|_| AxisCache::default()),
            damage: DamageRegion::Full,
        }
    }

    /// Bounding rect.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }

    /// Zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    /// Theme copy.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Label font.
    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Label style.
    #[must_use]
    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// Shadow quality.
    #[must_use]
    pub fn shadow_quality(&self) -> ShadowQuality {
        self.shadow_quality
    }

    /// Selection mode.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Mesh file name.
    #[must_use]
    pub fn mesh_file_name(&self) -> &str {
        &self.mesh_file_name
    }

    /// Grid visibility.
    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    /// Background visibility.
    #[must_use]
    pub fn background_enabled(&self) -> bool {
        self.background_enabled
    }

    /// Cached state of an axis slot.
    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation) -> Option<&AxisCache> {
        Some(&self.axes[orientation.slot()?])
    }

    /// Damage accumulated since the last plan.
    #[must_use]
    pub fn pending_damage(&self) -> &DamageRegion {
        &self.damage
    }

    /// Builds the plan for the current state and takes the accumulated
    /// damage, leaving [`DamageRegion::None`] behind.
    pub fn build_plan(&mut self) -> (RenderPlan, DamageRegion) {
        let mut plan = RenderPlan::new(self.bounding_rect, self.zoom_level);
        let damage = self.build_plan_into(&mut plan);
        (plan, damage)
    }

    /// Like [`build_plan`](Self::build_plan), but refills an existing plan
    /// so its item buffer is reused across frames.
    ///
    /// Grid and background are drawn only when both the scene flag and the
    /// theme flag of the same name are on.
    pub fn build_plan_into(&mut self, plan: &mut RenderPlan) -> DamageRegion {
        plan.clear();
        plan.bounding_rect = self.bounding_rect;
        plan.zoom_level = self.zoom_level;
        if self.background_enabled && self.theme.background_enabled() {
            plan.items.push(RenderItem::Background {
                color: self.theme.background_color(),
            });
        }
        let grid = self.grid_enabled && self.theme.grid_enabled();
        for (axis, orientation) in self.axes.iter().zip(AxisOrientation::SLOTS) {
            axis.push_items(orientation, &self.theme, grid, &mut plan.items);
        }
        mem::replace(&mut self.damage, DamageRegion::None)
    }

    fn scene_changed(&mut self) {
        self.damage.merge(&DamageRegion::Full);
    }

    fn axis_slot(&mut self, orientation: AxisOrientation) -> Option<&mut AxisCache> {
        let Some(slot) = orientation.slot() else {
            warn!(?orientation, "axis update without a slot ignored");
            return None;
        };
        self.damage.merge(&DamageRegion::axis(orientation));
        Some(&mut self.axes[slot])
    }
}

impl Renderer for RenderCache {
    fn update_position(&mut self, rect: Rect) {
        self.bounding_rect = rect;
        self.scene_changed();
    }

    fn update_bounding_rect(&mut self, rect: Rect) {
        self.bounding_rect = rect;
        self.scene_changed();
    }

    fn update_zoom_level(&mut self, zoom_level: i32) {
        self.zoom_level = zoom_level;
        self.scene_changed();
    }

    fn update_theme(&mut self, delta: ThemeDelta) {
        if delta.apply_to(&mut self.theme) {
            self.scene_changed();
        }
    }

    fn update_font(&mut self, font: Font) {
        self.font = font;
        self.scene_changed();
    }

    fn update_label_style(&mut self, style: LabelStyle) {
        self.label_style = style;
        self.scene_changed();
    }

    fn update_shadow_quality(&mut self, quality: ShadowQuality) {
        self.shadow_quality = quality;
        self.scene_changed();
    }

    fn update_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
        self.scene_changed();
    }

    fn update_mesh_file_name(&mut self, file_name: String) {
        self.mesh_file_name = file_name;
        self.scene_changed();
    }

    fn update_grid_enabled(&mut self, enabled: bool) {
        self.grid_enabled = enabled;
        self.scene_changed();
    }

    fn update_background_enabled(&mut self, enabled: bool) {
        self.background_enabled = enabled;
        self.scene_changed();
    }

    fn update_axis_type(&mut self, orientation: AxisOrientation, axis_type: AxisType) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.axis_type = axis_type;
        }
    }

    fn update_axis_title(&mut self, orientation: AxisOrientation, title: String) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.title = title;
        }
    }

    fn update_axis_labels(&mut self, orientation: AxisOrientation, labels: Vec<String>) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.labels = labels;
        }
    }

    fn update_axis_range(&mut self, orientation: AxisOrientation, min: f32, max: f32) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.min = min;
            axis.max = max;
        }
    }

    fn update_axis_segment_count(&mut self, orientation: AxisOrientation, count: u32) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.segment_count = count;
        }
    }

    fn update_axis_sub_segment_count(&mut self, orientation: AxisOrientation, count: u32) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.sub_segment_count = count;
        }
    }

    fn update_axis_label_format(&mut self, orientation: AxisOrientation, format: String) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.label_format = format;
        }
    }

    fn update_axis_formatter(&mut self, orientation: AxisOrientation, formatter: ValueAxisFormatter) {
        if let Some(axis) = self.axis_slot(orientation) {
            axis.formatter = formatter;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use trellis_core::controller::{Controller, ControllerConfig};
    use trellis_core::data::BarDataProxy;

    use super::*;

    fn synced_cache(controller: &mut Controller) -> RenderCache {
        let mut cache = RenderCache::new();
        controller.sync(Some(&mut cache));
        cache
    }

    #[test]
    fn first_sync_mirrors_controller() {
        let mut controller = Controller::new(ControllerConfig::bars());
        controller.set_mesh_file_name("bar.obj");
        controller.set_zoom_level(1000);
        let cache = synced_cache(&mut controller);

        assert_eq!(cache.zoom_level(), 500);
        assert_eq!(cache.mesh_file_name(), "bar.obj");
        assert_eq!(cache.theme().base_color(), controller.theme().base_color());
        let y = cache.axis(AxisOrientation::Y).unwrap();
        assert_eq!(y.axis_type, AxisType::Value);
        assert_eq!(y.formatter.grid_positions(), [0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(y.labels.len(), 6);
    }

    #[test]
    fn formatter_copy_is_independent_of_the_axis() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        let mut cache = synced_cache(&mut controller);
        if let Some(mut x) = controller.axis_mut(AxisOrientation::X) {
            x.set_segment_count(2).unwrap();
        }
        let x = cache.axis(AxisOrientation::X).unwrap();
        assert_eq!(x.formatter.grid_positions().len(), 6);

        controller.sync(Some(&mut cache));
        let x = cache.axis(AxisOrientation::X).unwrap();
        assert_eq!(x.formatter.grid_positions(), [0.0_f32, 0.5, 1.0]);
        assert_eq!(x.segment_count, 2);
    }

    #[test]
    fn theme_delta_only_touches_changed_fields() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut cache = synced_cache(&mut controller);
        _ = cache.build_plan();
        let before = cache.theme().clone();

        controller.theme_mut().set_ambient_light_strength(0.9).unwrap();
        controller.sync(Some(&mut cache));
        assert_eq!(cache.theme().ambient_light_strength(), 0.9);
        assert_eq!(cache.theme().base_color(), before.base_color());
        assert_eq!(cache.theme().light_strength(), before.light_strength());
        assert!(cache.pending_damage().covers_axis(AxisOrientation::X));
    }

    #[test]
    fn unchanged_frames_report_no_damage() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut cache = synced_cache(&mut controller);
        let (_, damage) = cache.build_plan();
        assert_eq!(damage, DamageRegion::Full);

        controller.sync(Some(&mut cache));
        let (_, damage) = cache.build_plan();
        assert!(damage.is_empty());

        if let Some(mut y) = controller.axis_mut(AxisOrientation::Y) {
            y.set_title("Sales");
        }
        controller.sync(Some(&mut cache));
        let (_, damage) = cache.build_plan();
        assert_eq!(damage, DamageRegion::axis(AxisOrientation::Y));
    }

    #[test]
    fn plan_places_category_and_value_decorations() {
        let mut controller = Controller::new(ControllerConfig::bars());
        let mut data = BarDataProxy::new();
        data.add_row("Mon", vec![1.0, 2.0]);
        data.add_row("Tue", vec![3.0, 4.0]);
        controller.set_data_proxy(data);
        let mut cache = synced_cache(&mut controller);

        let (plan, _) = cache.build_plan();
        assert!(matches!(plan.items[0], RenderItem::Background { .. }));
        let x_labels: Vec<(f32, &str)> = plan
            .axis_items(AxisOrientation::X)
            .filter_map(|item| match item {
                RenderItem::Label { position, text, .. } => Some((*position, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(x_labels, [(0.25, "Mon"), (0.75, "Tue")]);
        let y_lines = plan
            .axis_items(AxisOrientation::Y)
            .filter(|item| matches!(item, RenderItem::GridLine { .. }))
            .count();
        assert_eq!(y_lines, 6);
    }

    #[test]
    fn disabled_grid_and_background_drop_items() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        controller.set_grid_enabled(false);
        controller.set_background_enabled(false);
        let mut cache = synced_cache(&mut controller);
        let (plan, _) = cache.build_plan();
        assert!(plan.items.iter().all(|item| matches!(item, RenderItem::Label { .. })));
        assert_eq!(plan.items.len(), 18);
    }

    #[test]
    fn theme_flags_also_hide_grid_and_background() {
        let mut controller = Controller::new(ControllerConfig::scatter());
        let mut cache = synced_cache(&mut controller);
        let mut plan = RenderPlan::default();
        _ = cache.build_plan_into(&mut plan);
        let full = plan.items.len();
        assert!(full > 18);

        controller.theme_mut().set_grid_enabled(false);
        controller.theme_mut().set_background_enabled(false);
        controller.sync(Some(&mut cache));
        assert!(cache.grid_enabled());
        let damage = cache.build_plan_into(&mut plan);
        assert_eq!(damage, DamageRegion::Full);
        assert!(plan.items.iter().all(|item| matches!(item, RenderItem::Label { .. })));
        assert_eq!(plan.items.len(), 18);

        controller.theme_mut().set_grid_enabled(true);
        controller.theme_mut().set_background_enabled(true);
        controller.sync(Some(&mut cache));
        _ = cache.build_plan_into(&mut plan);
        assert_eq!(plan.items.len(), full);
    }

    #[test]
    fn axis_update_without_slot_is_ignored() {
        let mut cache = RenderCache::new();
        _ = cache.build_plan();
        cache.update_axis_title(AxisOrientation::None, String::from("lost"));
        assert!(cache.pending_damage().is_empty());
    }
}
