// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field-granular theme model.
//!
//! A [`Theme`] is a flat bundle of colors, gradients, light parameters and
//! toggles. Each field has its own dirty bit: a setter only marks it when the
//! value actually changes. [`Theme::take_delta`] drains every dirty field into
//! a [`ThemeDelta`], an ordered `(field, value)` list that can cross threads
//! and be applied to a render-side copy with [`ThemeDelta::apply_to`].
//! [`Theme::sync`] does both in one step.
//!
//! The protocol is one-directional: a target only ever receives the fields
//! whose source bit was set, never a deep copy.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::error::PropertyError;

/// Width of the gradient texture the default gradients span.
pub const GRADIENT_TEXTURE_WIDTH: f64 = 2.0;

/// Height of the gradient texture the default gradients span.
pub const GRADIENT_TEXTURE_HEIGHT: f64 = 1024.0;

/// Brightness factor used to derive gradient start colors from presets.
const GRADIENT_COLOR_LEVEL: f32 = 0.7;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u32(0xffffff);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u32(0x000000);
    /// Opaque gray.
    pub const GRAY: Self = Self::from_rgb_u32(0xa0a0a4);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u32(0xff0000);
    /// Opaque blue.
    pub const BLUE: Self = Self::from_rgb_u32(0x0000ff);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from `0xRRGGBB`.
    #[must_use]
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Scales the color channels by `level` (clamped to `[0, 1]`).
    #[must_use]
    pub fn scaled(self, level: f32) -> Self {
        let level = level.clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * level + 0.5) as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

/// One color stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset in `[0, 1]`.
    pub offset: f32,
    /// Color at the offset.
    pub color: Color,
}

/// A linear gradient between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Color stops, in offset order.
    pub stops: Vec<GradientStop>,
}

impl Default for LinearGradient {
    fn default() -> Self {
        Self::two_stop(Color::BLACK, Color::WHITE)
    }
}

impl LinearGradient {
    /// A vertical gradient over the gradient texture from `from` (offset 0) to
    /// `to` (offset 1).
    #[must_use]
    pub fn two_stop(from: Color, to: Color) -> Self {
        Self {
            start: Point::new(GRADIENT_TEXTURE_WIDTH, GRADIENT_TEXTURE_HEIGHT),
            end: Point::ZERO,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }

    /// The gradient a preset derives from a single color.
    #[must_use]
    pub fn from_color(color: Color) -> Self {
        Self::two_stop(color.scaled(GRADIENT_COLOR_LEVEL), color)
    }
}

/// A label font.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in points.
    pub point_size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: String::from("Arial"),
            point_size: 30.0,
            bold: false,
        }
    }
}

/// How object colors are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorStyle {
    /// One color for every object.
    #[default]
    Uniform,
    /// The base gradient stretched over each object.
    ObjectGradient,
    /// The base gradient stretched over the Y axis range.
    RangeGradient,
}

/// Built-in theme presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeType {
    /// Green on white.
    Qt,
    /// Yellow on white.
    PrimaryColors,
    /// Gray on white.
    Digia,
    /// Moss green on dark gray.
    StoneMoss,
    /// Navy on light gray.
    ArmyBlue,
    /// Brown on beige.
    Retro,
    /// White on black.
    Ebony,
    /// Yellow on black.
    Isabelle,
    /// No preset: fields keep whatever they were set to.
    #[default]
    UserDefined,
}

/// Identifies one theme field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ThemeField {
    /// [`ThemeType`].
    Type,
    /// Object base color.
    BaseColor,
    /// Graph background color.
    BackgroundColor,
    /// Window color.
    WindowColor,
    /// Label text color.
    LabelTextColor,
    /// Label background color.
    LabelBackgroundColor,
    /// Grid line color.
    GridLineColor,
    /// Single-item highlight color.
    SingleHighlightColor,
    /// Multi-item highlight color.
    MultiHighlightColor,
    /// Light color.
    LightColor,
    /// Object base gradient.
    BaseGradient,
    /// Single-item highlight gradient.
    SingleHighlightGradient,
    /// Multi-item highlight gradient.
    MultiHighlightGradient,
    /// Specular light strength.
    LightStrength,
    /// Ambient light strength.
    AmbientLightStrength,
    /// Highlight light strength.
    HighlightLightStrength,
    /// Label borders.
    LabelBorderEnabled,
    /// Label font.
    Font,
    /// Background visibility.
    BackgroundEnabled,
    /// Grid visibility.
    GridEnabled,
    /// Label background visibility.
    LabelBackgroundEnabled,
    /// [`ColorStyle`].
    ColorStyle,
}

impl ThemeField {
    /// Every field, in sync order.
    pub const ALL: [Self; 22] = [
        Self::Type,
        Self::BaseColor,
        Self::BackgroundColor,
        Self::WindowColor,
        Self::LabelTextColor,
        Self::LabelBackgroundColor,
        Self::GridLineColor,
        Self::SingleHighlightColor,
        Self::MultiHighlightColor,
        Self::LightColor,
        Self::BaseGradient,
        Self::SingleHighlightGradient,
        Self::MultiHighlightGradient,
        Self::LightStrength,
        Self::AmbientLightStrength,
        Self::HighlightLightStrength,
        Self::LabelBorderEnabled,
        Self::Font,
        Self::BackgroundEnabled,
        Self::GridEnabled,
        Self::LabelBackgroundEnabled,
        Self::ColorStyle,
    ];

    const fn bit(self) -> u32 {
        1 << self as u8
    }
}

/// One drained theme field and its value.
#[derive(Clone, Debug, PartialEq)]
pub enum ThemeValue {
    /// See [`ThemeField::Type`].
    Type(ThemeType),
    /// See [`ThemeField::BaseColor`].
    BaseColor(Color),
    /// See [`ThemeField::BackgroundColor`].
    BackgroundColor(Color),
    /// See [`ThemeField::WindowColor`].
    WindowColor(Color),
    /// See [`ThemeField::LabelTextColor`].
    LabelTextColor(Color),
    /// See [`ThemeField::LabelBackgroundColor`].
    LabelBackgroundColor(Color),
    /// See [`ThemeField::GridLineColor`].
    GridLineColor(Color),
    /// See [`ThemeField::SingleHighlightColor`].
    SingleHighlightColor(Color),
    /// See [`ThemeField::MultiHighlightColor`].
    MultiHighlightColor(Color),
    /// See [`ThemeField::LightColor`].
    LightColor(Color),
    /// See [`ThemeField::BaseGradient`].
    BaseGradient(LinearGradient),
    /// See [`ThemeField::SingleHighlightGradient`].
    SingleHighlightGradient(LinearGradient),
    /// See [`ThemeField::MultiHighlightGradient`].
    MultiHighlightGradient(LinearGradient),
    /// See [`ThemeField::LightStrength`].
    LightStrength(f32),
    /// See [`ThemeField::AmbientLightStrength`].
    AmbientLightStrength(f32),
    /// See [`ThemeField::HighlightLightStrength`].
    HighlightLightStrength(f32),
    /// See [`ThemeField::LabelBorderEnabled`].
    LabelBorderEnabled(bool),
    /// See [`ThemeField::Font`].
    Font(Font),
    /// See [`ThemeField::BackgroundEnabled`].
    BackgroundEnabled(bool),
    /// See [`ThemeField::GridEnabled`].
    GridEnabled(bool),
    /// See [`ThemeField::LabelBackgroundEnabled`].
    LabelBackgroundEnabled(bool),
    /// See [`ThemeField::ColorStyle`].
    ColorStyle(ColorStyle),
}

impl ThemeValue {
    /// Returns the field this value belongs to.
    #[must_use]
    pub fn field(&self) -> ThemeField {
        match self {
            Self::Type(_) => ThemeField::Type,
            Self::BaseColor(_) => ThemeField::BaseColor,
            Self::BackgroundColor(_) => ThemeField::BackgroundColor,
            Self::WindowColor(_) => ThemeField::WindowColor,
            Self::LabelTextColor(_) => ThemeField::LabelTextColor,
            Self::LabelBackgroundColor(_) => ThemeField::LabelBackgroundColor,
            Self::GridLineColor(_) => ThemeField::GridLineColor,
            Self::SingleHighlightColor(_) => ThemeField::SingleHighlightColor,
            Self::MultiHighlightColor(_) => ThemeField::MultiHighlightColor,
            Self::LightColor(_) => ThemeField::LightColor,
            Self::BaseGradient(_) => ThemeField::BaseGradient,
            Self::SingleHighlightGradient(_) => ThemeField::SingleHighlightGradient,
            Self::MultiHighlightGradient(_) => ThemeField::MultiHighlightGradient,
            Self::LightStrength(_) => ThemeField::LightStrength,
            Self::AmbientLightStrength(_) => ThemeField::AmbientLightStrength,
            Self::HighlightLightStrength(_) => ThemeField::HighlightLightStrength,
            Self::LabelBorderEnabled(_) => ThemeField::LabelBorderEnabled,
            Self::Font(_) => ThemeField::Font,
            Self::BackgroundEnabled(_) => ThemeField::BackgroundEnabled,
            Self::GridEnabled(_) => ThemeField::GridEnabled,
            Self::LabelBackgroundEnabled(_) => ThemeField::LabelBackgroundEnabled,
            Self::ColorStyle(_) => ThemeField::ColorStyle,
        }
    }
}

/// The changed fields drained from a theme, in field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeDelta {
    values: Vec<ThemeValue>,
}

impl ThemeDelta {
    /// Returns `true` if no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates the changed fields.
    pub fn iter(&self) -> core::slice::Iter<'_, ThemeValue> {
        self.values.iter()
    }

    /// Applies every value through `target`'s setters, so the target marks
    /// its own dirty bits. Returns `true` if the delta was non-empty.
    pub fn apply_to(&self, target: &mut Theme) -> bool {
        for value in &self.values {
            target.apply_value(value.clone());
        }
        !self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a ThemeDelta {
    type Item = &'a ThemeValue;
    type IntoIter = core::slice::Iter<'a, ThemeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FieldSet(u32);

impl FieldSet {
    const ALL: Self = Self((1 << ThemeField::ALL.len()) - 1);

    fn insert(&mut self, field: ThemeField) {
        self.0 |= field.bit();
    }

    fn contains(self, field: ThemeField) -> bool {
        self.0 & field.bit() != 0
    }
}

/// Generates a comparing setter and a by-value getter per field.
macro_rules! copy_fields {
    ($($(#[$doc:meta])* $field:ident, $set:ident: $ty:ty => $tag:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $field(&self) -> $ty {
                self.$field
            }

            #[doc = concat!("Sets [`", stringify!($field), "`](Self::", stringify!($field), ").")]
            pub fn $set(&mut self, value: $ty) {
                if self.$field != value {
                    self.$field = value;
                    self.touch(ThemeField::$tag);
                }
            }
        )*
    };
}

/// Generates a comparing setter and a by-reference getter per field.
macro_rules! ref_fields {
    ($($(#[$doc:meta])* $field:ident, $set:ident: $ty:ty => $tag:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $field(&self) -> &$ty {
                &self.$field
            }

            #[doc = concat!("Sets [`", stringify!($field), "`](Self::", stringify!($field), ").")]
            pub fn $set(&mut self, value: $ty) {
                if self.$field != value {
                    self.$field = value;
                    self.touch(ThemeField::$tag);
                }
            }
        )*
    };
}

/// A theme: visual parameters plus one dirty bit per field.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    theme_type: ThemeType,
    base_color: Color,
    background_color: Color,
    window_color: Color,
    label_text_color: Color,
    label_background_color: Color,
    grid_line_color: Color,
    single_highlight_color: Color,
    multi_highlight_color: Color,
    light_color: Color,
    base_gradient: LinearGradient,
    single_highlight_gradient: LinearGradient,
    multi_highlight_gradient: LinearGradient,
    light_strength: f32,
    ambient_light_strength: f32,
    highlight_light_strength: f32,
    label_border_enabled: bool,
    font: Font,
    background_enabled: bool,
    grid_enabled: bool,
    label_background_enabled: bool,
    color_style: ColorStyle,
    dirty: FieldSet,
    revision: u64,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeType::UserDefined)
    }
}

impl Theme {
    /// Valid range of [`light_strength`](Self::light_strength) and
    /// [`highlight_light_strength`](Self::highlight_light_strength).
    pub const LIGHT_STRENGTH_RANGE: (f32, f32) = (0.0, 10.0);

    /// Valid range of [`ambient_light_strength`](Self::ambient_light_strength).
    pub const AMBIENT_STRENGTH_RANGE: (f32, f32) = (0.0, 1.0);

    /// Creates a theme seeded from a preset, with every dirty bit clear.
    #[must_use]
    pub fn new(theme_type: ThemeType) -> Self {
        let mut theme = Self {
            theme_type: ThemeType::UserDefined,
            base_color: Color::WHITE,
            background_color: Color::BLACK,
            window_color: Color::BLACK,
            label_text_color: Color::WHITE,
            label_background_color: Color::GRAY,
            grid_line_color: Color::WHITE,
            single_highlight_color: Color::RED,
            multi_highlight_color: Color::BLUE,
            light_color: Color::WHITE,
            base_gradient: LinearGradient::default(),
            single_highlight_gradient: LinearGradient::default(),
            multi_highlight_gradient: LinearGradient::default(),
            light_strength: 5.0,
            ambient_light_strength: 0.25,
            highlight_light_strength: 7.5,
            label_border_enabled: true,
            font: Font::default(),
            background_enabled: true,
            grid_enabled: true,
            label_background_enabled: true,
            color_style: ColorStyle::Uniform,
            dirty: FieldSet::default(),
            revision: 0,
        };
        theme.set_type(theme_type);
        theme.dirty = FieldSet::default();
        theme.revision = 0;
        theme
    }

    /// Returns the preset this theme was last switched to.
    #[must_use]
    pub fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    /// Switches to a preset, overwriting the fields it defines.
    ///
    /// [`ThemeType::UserDefined`] only changes the type.
    pub fn set_type(&mut self, theme_type: ThemeType) {
        if self.theme_type == theme_type {
            return;
        }
        self.theme_type = theme_type;
        self.touch(ThemeField::Type);
        if let Some(preset) = Preset::of(theme_type) {
            self.apply_preset(&preset);
        }
    }

    copy_fields! {
        /// Object base color.
        base_color, set_base_color: Color => BaseColor;
        /// Graph background color.
        background_color, set_background_color: Color => BackgroundColor;
        /// Window color.
        window_color, set_window_color: Color => WindowColor;
        /// Label text color.
        label_text_color, set_label_text_color: Color => LabelTextColor;
        /// Label background color.
        label_background_color, set_label_background_color: Color => LabelBackgroundColor;
        /// Grid line color.
        grid_line_color, set_grid_line_color: Color => GridLineColor;
        /// Single-item highlight color.
        single_highlight_color, set_single_highlight_color: Color => SingleHighlightColor;
        /// Multi-item highlight color.
        multi_highlight_color, set_multi_highlight_color: Color => MultiHighlightColor;
        /// Light color.
        light_color, set_light_color: Color => LightColor;
        /// Whether labels have borders.
        label_border_enabled, set_label_border_enabled: bool => LabelBorderEnabled;
        /// Whether the background is drawn.
        background_enabled, set_background_enabled: bool => BackgroundEnabled;
        /// Whether the grid is drawn.
        grid_enabled, set_grid_enabled: bool => GridEnabled;
        /// Whether labels have a background.
        label_background_enabled, set_label_background_enabled: bool => LabelBackgroundEnabled;
        /// How object colors are chosen.
        color_style, set_color_style: ColorStyle => ColorStyle;
    }

    ref_fields! {
        /// Object base gradient.
        base_gradient, set_base_gradient: LinearGradient => BaseGradient;
        /// Single-item highlight gradient.
        single_highlight_gradient, set_single_highlight_gradient: LinearGradient => SingleHighlightGradient;
        /// Multi-item highlight gradient.
        multi_highlight_gradient, set_multi_highlight_gradient: LinearGradient => MultiHighlightGradient;
        /// Label font.
        font, set_font: Font => Font;
    }

    /// Specular light strength, in `[0, 10]`.
    #[must_use]
    pub fn light_strength(&self) -> f32 {
        self.light_strength
    }

    /// Sets the specular light strength. Values outside `[0, 10]` are rejected.
    pub fn set_light_strength(&mut self, strength: f32) -> Result<(), PropertyError> {
        check_range("light strength", strength, Self::LIGHT_STRENGTH_RANGE)?;
        if self.light_strength != strength {
            self.light_strength = strength;
            self.touch(ThemeField::LightStrength);
        }
        Ok(())
    }

    /// Ambient light strength, in `[0, 1]`.
    #[must_use]
    pub fn ambient_light_strength(&self) -> f32 {
        self.ambient_light_strength
    }

    /// Sets the ambient light strength. Values outside `[0, 1]` are rejected.
    pub fn set_ambient_light_strength(&mut self, strength: f32) -> Result<(), PropertyError> {
        check_range("ambient light strength", strength, Self::AMBIENT_STRENGTH_RANGE)?;
        if self.ambient_light_strength != strength {
            self.ambient_light_strength = strength;
            self.touch(ThemeField::AmbientLightStrength);
        }
        Ok(())
    }

    /// Highlight light strength, in `[0, 10]`.
    #[must_use]
    pub fn highlight_light_strength(&self) -> f32 {
        self.highlight_light_strength
    }

    /// Sets the highlight light strength. Values outside `[0, 10]` are
    /// rejected.
    pub fn set_highlight_light_strength(&mut self, strength: f32) -> Result<(), PropertyError> {
        check_range(
            "highlight light strength",
            strength,
            Self::LIGHT_STRENGTH_RANGE,
        )?;
        if self.highlight_light_strength != strength {
            self.highlight_light_strength = strength;
            self.touch(ThemeField::HighlightLightStrength);
        }
        Ok(())
    }

    // -- Dirty state --

    /// Returns `true` if `field` changed since the last drain.
    #[must_use]
    pub fn is_dirty(&self, field: ThemeField) -> bool {
        self.dirty.contains(field)
    }

    /// Returns `true` if any field changed since the last drain.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.dirty != FieldSet::default()
    }

    /// Number of effective mutations since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks every field dirty so the next drain pushes the whole theme.
    pub fn mark_all_dirty(&mut self) {
        self.dirty = FieldSet::ALL;
    }

    /// Drains every dirty field into a delta and clears the bits.
    pub fn take_delta(&mut self) -> ThemeDelta {
        let dirty = core::mem::take(&mut self.dirty);
        let values = ThemeField::ALL
            .into_iter()
            .filter(|field| dirty.contains(*field))
            .map(|field| self.value_of(field))
            .collect();
        ThemeDelta { values }
    }

    /// Pushes every dirty field into `target` and clears the bits here.
    ///
    /// Returns `true` if at least one field was pushed. A second call with no
    /// mutation in between returns `false` and leaves `target` alone.
    pub fn sync(&mut self, target: &mut Self) -> bool {
        self.take_delta().apply_to(target)
    }

    /// Returns the current value of a field.
    #[must_use]
    pub fn value_of(&self, field: ThemeField) -> ThemeValue {
        match field {
            ThemeField::Type => ThemeValue::Type(self.theme_type),
            ThemeField::BaseColor => ThemeValue::BaseColor(self.base_color),
            ThemeField::BackgroundColor => ThemeValue::BackgroundColor(self.background_color),
            ThemeField::WindowColor => ThemeValue::WindowColor(self.window_color),
            ThemeField::LabelTextColor => ThemeValue::LabelTextColor(self.label_text_color),
            ThemeField::LabelBackgroundColor => {
                ThemeValue::LabelBackgroundColor(self.label_background_color)
            }
            ThemeField::GridLineColor => ThemeValue::GridLineColor(self.grid_line_color),
            ThemeField::SingleHighlightColor => {
                ThemeValue::SingleHighlightColor(self.single_highlight_color)
            }
            ThemeField::MultiHighlightColor => {
                ThemeValue::MultiHighlightColor(self.multi_highlight_color)
            }
            ThemeField::LightColor => ThemeValue::LightColor(self.light_color),
            ThemeField::BaseGradient => ThemeValue::BaseGradient(self.base_gradient.clone()),
            ThemeField::SingleHighlightGradient => {
                ThemeValue::SingleHighlightGradient(self.single_highlight_gradient.clone())
            }
            ThemeField::MultiHighlightGradient => {
                ThemeValue::MultiHighlightGradient(self.multi_highlight_gradient.clone())
            }
            ThemeField::LightStrength => ThemeValue::LightStrength(self.light_strength),
            ThemeField::AmbientLightStrength => {
                ThemeValue::AmbientLightStrength(self.ambient_light_strength)
            }
            ThemeField::HighlightLightStrength => {
                ThemeValue::HighlightLightStrength(self.highlight_light_strength)
            }
            ThemeField::LabelBorderEnabled => {
                ThemeValue::LabelBorderEnabled(self.label_border_enabled)
            }
            ThemeField::Font => ThemeValue::Font(self.font.clone()),
            ThemeField::BackgroundEnabled => ThemeValue::BackgroundEnabled(self.background_enabled),
            ThemeField::GridEnabled => ThemeValue::GridEnabled(self.grid_enabled),
            ThemeField::LabelBackgroundEnabled => {
                ThemeValue::LabelBackgroundEnabled(self.label_background_enabled)
            }
            ThemeField::ColorStyle => ThemeValue::ColorStyle(self.color_style),
        }
    }

    fn apply_value(&mut self, value: ThemeValue) {
        match value {
            // The type is copied as-is; the preset fields arrive in the same delta.
            ThemeValue::Type(t) => {
                if self.theme_type != t {
                    self.theme_type = t;
                    self.touch(ThemeField::Type);
                }
            }
            ThemeValue::BaseColor(c) => self.set_base_color(c),
            ThemeValue::BackgroundColor(c) => self.set_background_color(c),
            ThemeValue::WindowColor(c) => self.set_window_color(c),
            ThemeValue::LabelTextColor(c) => self.set_label_text_color(c),
            ThemeValue::LabelBackgroundColor(c) => self.set_label_background_color(c),
            ThemeValue::GridLineColor(c) => self.set_grid_line_color(c),
            ThemeValue::SingleHighlightColor(c) => self.set_single_highlight_color(c),
            ThemeValue::MultiHighlightColor(c) => self.set_multi_highlight_color(c),
            ThemeValue::LightColor(c) => self.set_light_color(c),
            ThemeValue::BaseGradient(g) => self.set_base_gradient(g),
            ThemeValue::SingleHighlightGradient(g) => self.set_single_highlight_gradient(g),
            ThemeValue::MultiHighlightGradient(g) => self.set_multi_highlight_gradient(g),
            // Drained values already passed validation on the source.
            ThemeValue::LightStrength(s) => {
                _ = self.set_light_strength(s);
            }
            ThemeValue::AmbientLightStrength(s) => {
                _ = self.set_ambient_light_strength(s);
            }
            ThemeValue::HighlightLightStrength(s) => {
                _ = self.set_highlight_light_strength(s);
            }
            ThemeValue::LabelBorderEnabled(b) => self.set_label_border_enabled(b),
            ThemeValue::Font(f) => self.set_font(f),
            ThemeValue::BackgroundEnabled(b) => self.set_background_enabled(b),
            ThemeValue::GridEnabled(b) => self.set_grid_enabled(b),
            ThemeValue::LabelBackgroundEnabled(b) => self.set_label_background_enabled(b),
            ThemeValue::ColorStyle(s) => self.set_color_style(s),
        }
    }

    fn apply_preset(&mut self, preset: &Preset) {
        self.set_base_color(preset.base);
        self.set_background_color(preset.background);
        self.set_window_color(preset.window);
        self.set_label_text_color(preset.text);
        self.set_label_background_color(preset.text_background);
        self.set_grid_line_color(preset.grid);
        self.set_single_highlight_color(preset.single_highlight);
        self.set_multi_highlight_color(preset.multi_highlight);
        self.set_light_color(Color::WHITE);
        self.set_base_gradient(LinearGradient::from_color(preset.base));
        self.set_single_highlight_gradient(LinearGradient::from_color(preset.single_highlight));
        self.set_multi_highlight_gradient(LinearGradient::from_color(preset.multi_highlight));
        // Preset strengths are within range.
        _ = self.set_light_strength(preset.light_strength);
        _ = self.set_ambient_light_strength(preset.ambient_light_strength);
        _ = self.set_highlight_light_strength(preset.highlight_light_strength);
        self.set_label_border_enabled(preset.label_border);
        self.set_font(Font::default());
        self.set_background_enabled(true);
        self.set_grid_enabled(true);
        self.set_label_background_enabled(true);
        self.set_color_style(ColorStyle::Uniform);
    }

    fn touch(&mut self, field: ThemeField) {
        self.dirty.insert(field);
        self.revision += 1;
    }
}

fn check_range(property: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), PropertyError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        PropertyError::OutOfRange {
            property,
            value,
            min,
            max,
        }
        .reject()
    }
}

/// Colors and light parameters a preset assigns.
struct Preset {
    base: Color,
    background: Color,
    window: Color,
    text: Color,
    text_background: Color,
    grid: Color,
    single_highlight: Color,
    multi_highlight: Color,
    light_strength: f32,
    ambient_light_strength: f32,
    highlight_light_strength: f32,
    label_border: bool,
}

impl Preset {
    const fn new(
        base: u32,
        background: u32,
        window: u32,
        text: u32,
        text_background: u32,
        grid: u32,
        single_highlight: u32,
        multi_highlight: u32,
        label_border: bool,
    ) -> Self {
        Self {
            base: Color::from_rgb_u32(base),
            background: Color::from_rgb_u32(background),
            window: Color::from_rgb_u32(window),
            text: Color::from_rgb_u32(text),
            text_background: Color::from_rgb_u32(text_background),
            grid: Color::from_rgb_u32(grid),
            single_highlight: Color::from_rgb_u32(single_highlight),
            multi_highlight: Color::from_rgb_u32(multi_highlight),
            light_strength: 5.0,
            ambient_light_strength: 0.5,
            highlight_light_strength: 5.0,
            label_border,
        }
    }

    const fn of(theme_type: ThemeType) -> Option<Self> {
        Some(match theme_type {
            ThemeType::Qt => Self::new(
                0x80c342, 0xffffff, 0xffffff, 0x35322f, 0xffffff, 0xd7d6d5, 0x14aaff, 0x6d5fd5,
                true,
            ),
            ThemeType::PrimaryColors => Self::new(
                0xffe400, 0xffffff, 0xffffff, 0x000000, 0xffffff, 0xe7e7e7, 0x27beee, 0xee1414,
                false,
            ),
            ThemeType::Digia => Self::new(
                0xcccccc, 0xffffff, 0xffffff, 0x000000, 0xffffff, 0xe7e7e7, 0xfa0000, 0x555555,
                false,
            ),
            ThemeType::StoneMoss => Self::new(
                0xbeb32b, 0x4d4d4f, 0x4d4d4f, 0xffffff, 0x4d4d4f, 0x3e3e40, 0xfbf6d6, 0x442f20,
                true,
            ),
            ThemeType::ArmyBlue => Self::new(
                0x495f76, 0xd5d6d7, 0xd5d6d7, 0x000000, 0xd5d6d7, 0xaeadac, 0x2aa2f9, 0x103753,
                false,
            ),
            ThemeType::Retro => Self::new(
                0x533b23, 0xe9e2ce, 0xe9e2ce, 0x000000, 0xe9e2ce, 0xd0c0b0, 0x8ea317, 0xc25708,
                false,
            ),
            ThemeType::Ebony => Self::new(
                0xffffff, 0x000000, 0x000000, 0xaeadac, 0x000000, 0x35322f, 0xf5dc0d, 0xd72222,
                false,
            ),
            ThemeType::Isabelle => Self::new(
                0xf9d900, 0x000000, 0x000000, 0xaeadac, 0x000000, 0x35322f, 0xfff7cc, 0xde0a0a,
                false,
            ),
            ThemeType::UserDefined => return None,
        })
    }
}
