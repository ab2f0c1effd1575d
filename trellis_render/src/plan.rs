// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the decorations of one frame, back to front.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use trellis_core::axis::AxisOrientation;
use trellis_core::theme::Color;

/// A single draw command in the render plan.
///
/// Positions are normalized to `[0, 1]` along the item's axis.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderItem {
    /// The graph background.
    Background {
        /// Fill color.
        color: Color,
    },
    /// A main grid line.
    GridLine {
        /// Axis the line belongs to.
        orientation: AxisOrientation,
        /// Normalized position along the axis.
        position: f32,
        /// Line color.
        color: Color,
    },
    /// A subgrid line.
    SubGridLine {
        /// Axis the line belongs to.
        orientation: AxisOrientation,
        /// Normalized position along the axis.
        position: f32,
        /// Line color.
        color: Color,
    },
    /// An axis label.
    Label {
        /// Axis the label belongs to.
        orientation: AxisOrientation,
        /// Normalized position along the axis.
        position: f32,
        /// Label text.
        text: String,
        /// Text color.
        color: Color,
    },
}

impl RenderItem {
    /// The axis an item belongs to, or `None` for scene-wide items.
    #[must_use]
    pub fn orientation(&self) -> Option<AxisOrientation> {
        match self {
            Self::Background { .. } => None,
            Self::GridLine { orientation, .. }
            | Self::SubGridLine { orientation, .. }
            | Self::Label { orientation, .. } => Some(*orientation),
        }
    }
}

/// An ordered list of draw commands for a single frame.
///
/// The plan is immutable for the frame: it owns copies of everything it
/// needs, so a backend can draw from it while the cache takes the next
/// batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPlan {
    /// Viewport of the graph.
    pub bounding_rect: Rect,
    /// Zoom level in percent.
    pub zoom_level: i32,
    /// Draw items, back to front.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new(bounding_rect: Rect, zoom_level: i32) -> Self {
        Self {
            bounding_rect,
            zoom_level,
            items: Vec::new(),
        }
    }

    /// Items belonging to one axis.
    pub fn axis_items(&self, orientation: AxisOrientation) -> impl Iterator<Item = &RenderItem> {
        self.items
            .iter()
            .filter(move |item| item.orientation() == Some(orientation))
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
