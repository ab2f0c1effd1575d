// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-graph-kind controller defaults and the scene enums they seed.

use crate::axis::AxisType;
use crate::camera::ONE_TO_ONE_ZOOM_LEVEL;
use crate::theme::ThemeType;

/// The kind of graph a controller drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Bars on a category grid.
    Bars,
    /// Free-standing points.
    Scatter,
    /// A height field.
    Surface,
}

/// What a click selects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Selection disabled.
    None,
    /// A single item.
    #[default]
    Item,
    /// The item and its row.
    ItemAndRow,
    /// The item and its column.
    ItemAndColumn,
    /// The item, its row and its column.
    ItemRowAndColumn,
    /// A row, shown in a separate slice view.
    SliceRow,
    /// A column, shown in a separate slice view.
    SliceColumn,
}

impl SelectionMode {
    /// Whether the mode opens a slice view.
    #[must_use]
    pub const fn is_slice(self) -> bool {
        matches!(self, Self::SliceRow | Self::SliceColumn)
    }
}

/// Shadow rendering quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "variant names describe the quality level")]
pub enum ShadowQuality {
    None,
    Low,
    #[default]
    Medium,
    High,
    SoftLow,
    SoftMedium,
    SoftHigh,
}

/// How label backgrounds are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    /// Solid background.
    Opaque,
    /// Background opacity taken from the theme.
    #[default]
    FromTheme,
    /// No background.
    Transparent,
}

/// Initial state of a [`Controller`](super::Controller).
///
/// The constructors bake in the defaults of each graph kind; the `with_*`
/// methods adjust individual fields.
///
/// ```
/// use trellis_core::controller::{ControllerConfig, ShadowQuality};
/// use trellis_core::theme::ThemeType;
///
/// let config = ControllerConfig::bars()
///     .with_theme_type(ThemeType::Retro)
///     .with_shadow_quality(ShadowQuality::SoftHigh);
/// assert_eq!(config.theme_type, ThemeType::Retro);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Graph kind.
    pub kind: GraphKind,
    /// Types of the default X, Y and Z axes.
    pub axis_types: [AxisType; 3],
    /// Initial selection mode.
    pub selection_mode: SelectionMode,
    /// Initial shadow quality.
    pub shadow_quality: ShadowQuality,
    /// Initial label style.
    pub label_style: LabelStyle,
    /// Initial theme preset.
    pub theme_type: ThemeType,
    /// Initial zoom level, clamped on use.
    pub zoom_level: i32,
    /// Initial grid visibility.
    pub grid_enabled: bool,
    /// Initial background visibility.
    pub background_enabled: bool,
}

impl ControllerConfig {
    const fn base(kind: GraphKind, axis_types: [AxisType; 3]) -> Self {
        Self {
            kind,
            axis_types,
            selection_mode: SelectionMode::Item,
            shadow_quality: ShadowQuality::Medium,
            label_style: LabelStyle::FromTheme,
            theme_type: ThemeType::Qt,
            zoom_level: ONE_TO_ONE_ZOOM_LEVEL,
            grid_enabled: true,
            background_enabled: true,
        }
    }

    /// Bars: category X (rows) and Z (columns) axes, value Y axis.
    #[must_use]
    pub const fn bars() -> Self {
        Self::base(
            GraphKind::Bars,
            [AxisType::Category, AxisType::Value, AxisType::Category],
        )
    }

    /// Scatter: three value axes.
    #[must_use]
    pub const fn scatter() -> Self {
        Self::base(GraphKind::Scatter, [AxisType::Value; 3])
    }

    /// Surface: three value axes.
    #[must_use]
    pub const fn surface() -> Self {
        Self::base(GraphKind::Surface, [AxisType::Value; 3])
    }

    /// Replaces the selection mode.
    #[must_use]
    pub const fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Replaces the shadow quality.
    #[must_use]
    pub const fn with_shadow_quality(mut self, quality: ShadowQuality) -> Self {
        self.shadow_quality = quality;
        self
    }

    /// Replaces the theme preset.
    #[must_use]
    pub const fn with_theme_type(mut self, theme_type: ThemeType) -> Self {
        self.theme_type = theme_type;
        self
    }

    /// Replaces the zoom level.
    #[must_use]
    pub const fn with_zoom_level(mut self, zoom_level: i32) -> Self {
        self.zoom_level = zoom_level;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::bars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_differ_in_axis_types() {
        assert_eq!(ControllerConfig::bars().axis_types[0], AxisType::Category);
        assert_eq!(ControllerConfig::bars().axis_types[1], AxisType::Value);
        assert_eq!(ControllerConfig::scatter().axis_types, [AxisType::Value; 3]);
        assert_eq!(ControllerConfig::surface().kind, GraphKind::Surface);
    }

    #[test]
    fn builders_override_defaults() {
        let config = ControllerConfig::scatter()
            .with_selection_mode(SelectionMode::SliceRow)
            .with_zoom_level(250);
        assert!(config.selection_mode.is_slice());
        assert_eq!(config.zoom_level, 250);
        assert_eq!(config.shadow_quality, ShadowQuality::Medium);
    }
}
