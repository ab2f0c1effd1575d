// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and wheel input.
//!
//! [`InputHandler`] is a small state machine that turns platform pointer
//! events into camera moves on a [`Controller`]. Rotation and zoom reach the
//! renderer like any other controller mutation; the handler itself never
//! touches dirty state.

use kurbo::{Point, Rect, Vec2};

use crate::camera::{HALF_SIZE_ZOOM_LEVEL, ONE_TO_ONE_ZOOM_LEVEL};
use crate::controller::Controller;

/// Wheel divider above one-to-one zoom.
pub const NEAR_ZOOM_RANGE_DIVIDER: i32 = 12;

/// Wheel divider between half-size and one-to-one zoom.
pub const MID_ZOOM_RANGE_DIVIDER: i32 = 60;

/// Wheel divider at or below half-size zoom.
pub const FAR_ZOOM_RANGE_DIVIDER: i32 = 120;

/// What the pointer is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputState {
    /// Nothing pressed.
    #[default]
    None,
    /// Primary button pressed on the main view.
    OnScene,
    /// Primary button pressed on the overview while slicing.
    OnOverview,
    /// Primary button pressed on the slice view.
    OnSlice,
    /// Secondary button held, dragging rotates the camera.
    Rotating,
}

/// Pointer buttons the handler reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (usually left) button.
    Primary,
    /// Middle button: resets the camera.
    Middle,
    /// Secondary (usually right) button: rotates the camera.
    Secondary,
}

/// Pointer and wheel state machine.
#[derive(Clone, Debug, Default)]
pub struct InputHandler {
    state: InputState,
    position: Point,
    slicing: bool,
    main_viewport: Rect,
}

impl InputHandler {
    /// Creates an idle handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Last recorded pointer position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether a slice view is shown next to the main view.
    #[must_use]
    pub fn slicing_activated(&self) -> bool {
        self.slicing
    }

    /// Turns the slice view on or off.
    pub fn set_slicing_activated(&mut self, slicing: bool) {
        self.slicing = slicing;
    }

    /// Sets the main viewport. While slicing, presses inside it land on the
    /// overview, presses outside it on the slice.
    pub fn set_main_viewport(&mut self, viewport: Rect) {
        self.main_viewport = viewport;
    }

    /// Handles a button press at `position`.
    pub fn mouse_press(
        &mut self,
        controller: &mut Controller,
        button: MouseButton,
        position: Point,
    ) {
        match button {
            MouseButton::Primary if self.slicing => {
                self.state = if position.x <= self.main_viewport.width()
                    && position.y <= self.main_viewport.height()
                {
                    InputState::OnOverview
                } else {
                    InputState::OnSlice
                };
            }
            MouseButton::Primary => {
                self.state = InputState::OnScene;
                self.position = position;
            }
            MouseButton::Middle => {
                self.position = Point::ZERO;
                controller.reset_camera();
            }
            MouseButton::Secondary if !self.slicing => {
                self.state = InputState::Rotating;
                self.position = position;
            }
            MouseButton::Secondary => {}
        }
    }

    /// Handles a button release at `position`.
    pub fn mouse_release(&mut self, position: Point) {
        if self.state == InputState::Rotating {
            self.position = position;
        }
        self.state = InputState::None;
    }

    /// Handles pointer motion. While rotating, the motion since the last
    /// event rotates the camera.
    pub fn mouse_move(&mut self, controller: &mut Controller, position: Point) {
        if self.state != InputState::Rotating {
            return;
        }
        let delta: Vec2 = position - self.position;
        self.position = position;
        controller.rotate_camera(delta);
    }

    /// Handles a wheel step of `angle_delta` eighths of a degree.
    ///
    /// The closer the camera, the larger the zoom change per step. Ignored
    /// while slicing.
    pub fn wheel(&mut self, controller: &mut Controller, angle_delta: i32) {
        if self.slicing {
            return;
        }
        let zoom_level = controller.zoom_level();
        let divider = if zoom_level > ONE_TO_ONE_ZOOM_LEVEL {
            NEAR_ZOOM_RANGE_DIVIDER
        } else if zoom_level > HALF_SIZE_ZOOM_LEVEL {
            MID_ZOOM_RANGE_DIVIDER
        } else {
            FAR_ZOOM_RANGE_DIVIDER
        };
        controller.set_zoom_level(zoom_level + angle_delta / divider);
    }
}
