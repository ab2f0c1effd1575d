// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera rotation, zoom limits and presets.
//!
//! The [`CameraHelper`] receives rotation, zoom and preset updates from the
//! controller. It sits outside the sync protocol: camera moves request a
//! render through the change listener but never mark a dirty key.

use kurbo::Vec2;

/// Smallest allowed zoom level, in percent.
pub const MIN_ZOOM_LEVEL: i32 = 10;

/// Zoom level at which the scene is drawn at half size.
pub const HALF_SIZE_ZOOM_LEVEL: i32 = 50;

/// Zoom level at which the scene is drawn at its natural size.
pub const ONE_TO_ONE_ZOOM_LEVEL: i32 = 100;

/// Largest allowed zoom level, in percent.
pub const MAX_ZOOM_LEVEL: i32 = 500;

/// Allowed horizontal rotation, in degrees.
pub const HORIZONTAL_ROTATION_RANGE: (f64, f64) = (-180.0, 180.0);

/// Allowed vertical rotation, in degrees.
pub const VERTICAL_ROTATION_RANGE: (f64, f64) = (0.0, 90.0);

/// Default horizontal rotation of a new controller, in degrees.
pub const DEFAULT_HORIZONTAL_ROTATION: f64 = -45.0;

/// Default vertical rotation of a new controller, in degrees.
pub const DEFAULT_VERTICAL_ROTATION: f64 = 15.0;

/// Clamps a zoom level to [`MIN_ZOOM_LEVEL`]`..=`[`MAX_ZOOM_LEVEL`].
#[must_use]
pub fn clamp_zoom_level(zoom: i32) -> i32 {
    zoom.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL)
}

/// Clamps a rotation to the allowed horizontal and vertical ranges.
///
/// `x` is the horizontal rotation, `y` the vertical one. A NaN component
/// clamps to the lower bound of its range.
#[must_use]
pub fn clamp_rotation(rotation: Vec2) -> Vec2 {
    Vec2::new(
        clamp_degrees(rotation.x, HORIZONTAL_ROTATION_RANGE),
        clamp_degrees(rotation.y, VERTICAL_ROTATION_RANGE),
    )
}

fn clamp_degrees(degrees: f64, (min, max): (f64, f64)) -> f64 {
    if degrees.is_nan() {
        min
    } else {
        degrees.clamp(min, max)
    }
}

/// Wraps a horizontal rotation into `[-180, 180]`.
fn wrap_horizontal(degrees: f64) -> f64 {
    let (min, max) = HORIZONTAL_ROTATION_RANGE;
    if (min..=max).contains(&degrees) {
        return degrees;
    }
    let wrapped = (degrees - min) % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0 + min
    } else {
        wrapped + min
    }
}

/// Named camera positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "variant names describe the camera position")]
pub enum CameraPreset {
    FrontLow,
    Front,
    FrontHigh,
    LeftLow,
    Left,
    LeftHigh,
    RightLow,
    Right,
    RightHigh,
    BehindLow,
    Behind,
    BehindHigh,
    IsometricLeft,
    IsometricLeftHigh,
    IsometricRight,
    IsometricRightHigh,
    DirectlyAbove,
    DirectlyAboveCW45,
    DirectlyAboveCCW45,
}

impl CameraPreset {
    /// Returns the `(horizontal, vertical)` rotation of the preset in degrees.
    #[must_use]
    pub const fn rotation(self) -> Vec2 {
        let (h, v) = match self {
            Self::FrontLow => (0.0, 0.0),
            Self::Front => (0.0, 22.5),
            Self::FrontHigh => (0.0, 45.0),
            Self::LeftLow => (90.0, 0.0),
            Self::Left => (90.0, 22.5),
            Self::LeftHigh => (90.0, 45.0),
            Self::RightLow => (-90.0, 0.0),
            Self::Right => (-90.0, 22.5),
            Self::RightHigh => (-90.0, 45.0),
            Self::BehindLow => (180.0, 0.0),
            Self::Behind => (180.0, 22.5),
            Self::BehindHigh => (180.0, 45.0),
            Self::IsometricLeft => (45.0, 22.5),
            Self::IsometricLeftHigh => (45.0, 45.0),
            Self::IsometricRight => (-45.0, 22.5),
            Self::IsometricRightHigh => (-45.0, 45.0),
            Self::DirectlyAbove => (0.0, 90.0),
            Self::DirectlyAboveCW45 => (-45.0, 90.0),
            Self::DirectlyAboveCCW45 => (45.0, 90.0),
        };
        Vec2::new(h, v)
    }
}

/// Camera rotation, zoom level and the preset that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraHelper {
    rotation: Vec2,
    zoom_level: i32,
    preset: Option<CameraPreset>,
    rotation_speed: i32,
}

impl Default for CameraHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraHelper {
    /// Default drag rotation speed: one degree per pixel.
    pub const DEFAULT_ROTATION_SPEED: i32 = 100;

    /// Creates a camera at the default rotation and one-to-one zoom.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rotation: Vec2::new(DEFAULT_HORIZONTAL_ROTATION, DEFAULT_VERTICAL_ROTATION),
            zoom_level: ONE_TO_ONE_ZOOM_LEVEL,
            preset: None,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
        }
    }

    /// `(horizontal, vertical)` rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Zoom level in percent.
    #[must_use]
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    /// The active preset, cleared by any free rotation.
    #[must_use]
    pub fn preset(&self) -> Option<CameraPreset> {
        self.preset
    }

    /// Drag rotation speed.
    #[must_use]
    pub fn rotation_speed(&self) -> i32 {
        self.rotation_speed
    }

    /// Sets the drag rotation speed (at least 1).
    pub fn set_rotation_speed(&mut self, speed: i32) {
        self.rotation_speed = speed.max(1);
    }

    /// Sets rotation (clamped) and zoom level (clamped). Returns `true` if
    /// anything changed.
    ///
    /// A non-finite rotation component leaves that component unchanged.
    pub fn set_position(&mut self, rotation: Vec2, zoom_level: i32) -> bool {
        let rotation = clamp_rotation(Vec2::new(
            finite_or(rotation.x, self.rotation.x),
            finite_or(rotation.y, self.rotation.y),
        ));
        let zoom_level = clamp_zoom_level(zoom_level);
        self.preset = None;
        if self.rotation == rotation && self.zoom_level == zoom_level {
            return false;
        }
        self.rotation = rotation;
        self.zoom_level = zoom_level;
        true
    }

    /// Sets the zoom level (clamped). Returns `true` if it changed.
    pub fn set_zoom_level(&mut self, zoom_level: i32) -> bool {
        let zoom_level = clamp_zoom_level(zoom_level);
        let changed = self.zoom_level != zoom_level;
        self.zoom_level = zoom_level;
        changed
    }

    /// Moves to a preset. Returns `true` if the rotation changed.
    pub fn set_preset(&mut self, preset: CameraPreset) -> bool {
        self.preset = Some(preset);
        let rotation = preset.rotation();
        let changed = self.rotation != rotation;
        self.rotation = rotation;
        changed
    }

    /// Rotates by a pointer drag of `delta` pixels.
    ///
    /// Horizontal rotation wraps around at ±180°, vertical rotation is
    /// clamped to `[0, 90]`. A drag whose result is not finite leaves the
    /// rotation unchanged.
    pub fn rotate_by_drag(&mut self, delta: Vec2) -> Vec2 {
        let scale = f64::from(Self::DEFAULT_ROTATION_SPEED) / f64::from(self.rotation_speed);
        let h = self.rotation.x + delta.x * scale;
        let v = self.rotation.y + delta.y * scale;
        if !(h.is_finite() && v.is_finite()) {
            return self.rotation;
        }
        self.rotation = Vec2::new(
            wrap_horizontal(h),
            clamp_degrees(v, VERTICAL_ROTATION_RANGE),
        );
        self.preset = None;
        self.rotation
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(clamp_zoom_level(1000), MAX_ZOOM_LEVEL);
        assert_eq!(clamp_zoom_level(-3), MIN_ZOOM_LEVEL);
        assert_eq!(clamp_zoom_level(HALF_SIZE_ZOOM_LEVEL), 50);
    }

    #[test]
    fn position_is_clamped() {
        let mut camera = CameraHelper::new();
        assert!(camera.set_position(Vec2::new(270.0, -10.0), 20));
        assert_eq!(camera.rotation(), Vec2::new(180.0, 0.0));
        assert!(!camera.set_position(Vec2::new(999.0, -1.0), 20));
    }

    #[test]
    fn presets_set_rotation() {
        let mut camera = CameraHelper::new();
        assert!(camera.set_preset(CameraPreset::DirectlyAboveCW45));
        assert_eq!(camera.rotation(), Vec2::new(-45.0, 90.0));
        assert_eq!(camera.preset(), Some(CameraPreset::DirectlyAboveCW45));
        camera.rotate_by_drag(Vec2::new(1.0, 0.0));
        assert_eq!(camera.preset(), None);
    }

    #[test]
    fn drag_wraps_horizontal_and_clamps_vertical() {
        let mut camera = CameraHelper::new();
        camera.set_preset(CameraPreset::BehindHigh);
        let rotation = camera.rotate_by_drag(Vec2::new(30.0, 100.0));
        assert_eq!(rotation, Vec2::new(-150.0, 90.0));

        camera.set_rotation_speed(200);
        let rotation = camera.rotate_by_drag(Vec2::new(-20.0, -200.0));
        assert_eq!(rotation, Vec2::new(-160.0, 0.0));
    }

    #[test]
    fn huge_drags_wrap_into_range() {
        let mut camera = CameraHelper::new();
        let rotation = camera.rotate_by_drag(Vec2::new(1e20, 0.0));
        assert!((-180.0..=180.0).contains(&rotation.x));

        camera.set_position(Vec2::new(0.0, 45.0), 100);
        let rotation = camera.rotate_by_drag(Vec2::new(-720.0 - 90.0, 0.0));
        assert_eq!(rotation, Vec2::new(-90.0, 45.0));
    }

    #[test]
    fn non_finite_drags_are_ignored() {
        let mut camera = CameraHelper::new();
        let before = camera.rotation();
        for delta in [
            Vec2::new(f64::NAN, 0.0),
            Vec2::new(0.0, f64::INFINITY),
            Vec2::new(f64::NEG_INFINITY, 3.0),
        ] {
            assert_eq!(camera.rotate_by_drag(delta), before);
        }
    }

    #[test]
    fn non_finite_positions_keep_the_current_rotation() {
        let mut camera = CameraHelper::new();
        assert!(!camera.set_position(Vec2::new(f64::NAN, f64::INFINITY), 100));
        assert_eq!(
            camera.rotation(),
            Vec2::new(DEFAULT_HORIZONTAL_ROTATION, DEFAULT_VERTICAL_ROTATION)
        );

        assert!(camera.set_position(Vec2::new(f64::NAN, 45.0), 100));
        assert_eq!(camera.rotation(), Vec2::new(DEFAULT_HORIZONTAL_ROTATION, 45.0));
        assert_eq!(clamp_rotation(Vec2::new(f64::NAN, f64::NAN)), Vec2::new(-180.0, 0.0));
    }
}
