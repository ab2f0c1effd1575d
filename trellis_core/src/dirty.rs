// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channels, tracked property keys and the change tracker.
//!
//! Trellis uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! remember which properties still have to be pushed to the renderer. Each
//! channel holds an independent set of keys:
//!
//! - [`SCENE`] holds [`SceneProperty`] keys (position, zoom, theme, font and
//!   the other controller-level properties).
//! - [`AXIS_X`], [`AXIS_Y`] and [`AXIS_Z`] hold [`AxisProperty`] keys for the
//!   axis attached to that slot.
//!
//! No key is ever propagated to another: every property is pushed on its
//! own. Keys are only cleared by draining a channel, which happens exclusively
//! in the controller's sync pass.

use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::axis::AxisOrientation;

/// Controller-level property changed.
pub const SCENE: Channel = Channel::new(0);

/// Property of the X axis changed.
pub const AXIS_X: Channel = Channel::new(1);

/// Property of the Y axis changed.
pub const AXIS_Y: Channel = Channel::new(2);

/// Property of the Z axis changed.
pub const AXIS_Z: Channel = Channel::new(3);

/// A controller-level property that is pushed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum SceneProperty {
    /// Top-left corner of the bounding rect.
    Position = 0,
    /// Size (and position) of the bounding rect.
    BoundingRect = 1,
    /// Camera zoom level.
    ZoomLevel = 2,
    /// One or more theme fields.
    Theme = 3,
    /// Label font.
    Font = 4,
    /// Label background style.
    LabelStyle = 5,
    /// Shadow quality.
    ShadowQuality = 6,
    /// Selection mode.
    SelectionMode = 7,
    /// Object mesh file name.
    MeshFileName = 8,
    /// Grid visibility.
    GridEnabled = 9,
    /// Background visibility.
    BackgroundEnabled = 10,
}

impl SceneProperty {
    /// Every scene property, in push order.
    pub const ALL: [Self; 11] = [
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
    ];

    /// Returns the tracker key.
    #[must_use]
    pub const fn key(self) -> u32 {
        self as u32
    }

    /// Returns the property for a tracker key.
    #[must_use]
    pub fn from_key(key: u32) -> Option<Self> {
        Self::ALL.get(key as usize).copied()
    }
}

/// A per-axis property that is pushed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum AxisProperty {
    /// Category or value.
    Type = 0,
    /// Axis title.
    Title = 1,
    /// Label strings.
    Labels = 2,
    /// Minimum and maximum.
    Range = 3,
    /// Number of segments (value axes).
    SegmentCount = 4,
    /// Number of subsegments (value axes).
    SubSegmentCount = 5,
    /// printf-style label format (value axes).
    LabelFormat = 6,
    /// Snapshot of the computed formatter state (value axes).
    Formatter = 7,
}

impl AxisProperty {
    /// Every axis property, in push order.
    pub const ALL: [Self; 8] = [
        Self::Type,
        Self::Title,
        Self::Labels,
        Self::Range,
        Self::SegmentCount,
        Self::SubSegmentCount,
        Self::LabelFormat,
        Self::Formatter,
    ];

    /// Returns the tracker key.
    #[must_use]
    pub const fn key(self) -> u32 {
        self as u32
    }

    /// Returns the property for a tracker key.
    #[must_use]
    pub fn from_key(key: u32) -> Option<Self> {
        Self::ALL.get(key as usize).copied()
    }

    /// Whether the property only exists on value axes.
    #[must_use]
    pub const fn is_value_only(self) -> bool {
        matches!(
            self,
            Self::SegmentCount | Self::SubSegmentCount | Self::LabelFormat | Self::Formatter
        )
    }
}

/// Returns the channel and pending bit of an axis slot.
const fn axis_channel(orientation: AxisOrientation) -> Option<(Channel, u8)> {
    match orientation {
        AxisOrientation::X => Some((AXIS_X, 1 << 1)),
        AxisOrientation::Y => Some((AXIS_Y, 1 << 2)),
        AxisOrientation::Z => Some((AXIS_Z, 1 << 3)),
        AxisOrientation::None => None,
    }
}

const SCENE_PENDING: u8 = 1 << 0;

/// Which properties still need a push, grouped by channel.
///
/// Marking is cheap and idempotent. A channel's keys are returned (sorted and
/// de-duplicated) and cleared by the matching `drain_*` call; nothing else
/// clears them.
#[derive(Debug)]
pub struct ChangeTracker {
    dirty: DirtyTracker<u32>,
    /// One bit per channel that has been marked since its last drain.
    pending: u8,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    /// Creates a tracker with every channel clean.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending: 0,
        }
    }

    /// Marks a scene property as needing a push.
    pub fn mark_scene(&mut self, property: SceneProperty) {
        self.dirty.mark(property.key(), SCENE);
        self.pending |= SCENE_PENDING;
    }

    /// Marks a property of the axis in the given slot as needing a push.
    ///
    /// Marks for [`AxisOrientation::None`] are ignored: an unattached axis has
    /// no slot to push to.
    pub fn mark_axis(&mut self, orientation: AxisOrientation, property: AxisProperty) {
        if let Some((channel, bit)) = axis_channel(orientation) {
            self.dirty.mark(property.key(), channel);
            self.pending |= bit;
        }
    }

    /// Marks every property of the axis in the given slot.
    pub fn mark_axis_all(&mut self, orientation: AxisOrientation) {
        for property in AxisProperty::ALL {
            self.mark_axis(orientation, property);
        }
    }

    /// Returns `true` if no channel has pending keys.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.pending == 0
    }

    /// Returns `true` if the scene channel has pending keys.
    #[must_use]
    pub fn scene_pending(&self) -> bool {
        self.pending & SCENE_PENDING != 0
    }

    /// Returns `true` if the channel of the given axis slot has pending keys.
    #[must_use]
    pub fn axis_pending(&self, orientation: AxisOrientation) -> bool {
        axis_channel(orientation).is_some_and(|(_, bit)| self.pending & bit != 0)
    }

    /// Drains the scene channel.
    pub fn drain_scene(&mut self) -> Vec<SceneProperty> {
        self.pending &= !SCENE_PENDING;
        let keys = self.drain_keys(SCENE);
        keys.into_iter().filter_map(SceneProperty::from_key).collect()
    }

    /// Drains the channel of the given axis slot.
    pub fn drain_axis(&mut self, orientation: AxisOrientation) -> Vec<AxisProperty> {
        let Some((channel, bit)) = axis_channel(orientation) else {
            return Vec::new();
        };
        self.pending &= !bit;
        let keys = self.drain_keys(channel);
        keys.into_iter().filter_map(AxisProperty::from_key).collect()
    }

    fn drain_keys(&mut self, channel: Channel) -> Vec<u32> {
        let mut keys: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn new_tracker_is_clean() {
        let tracker = ChangeTracker::new();
        assert!(tracker.is_clean());
        assert!(!tracker.scene_pending());
        assert!(!tracker.axis_pending(AxisOrientation::X));
    }

    #[test]
    fn drain_returns_marked_keys_once() {
        let mut tracker = ChangeTracker::new();
        tracker.mark_scene(SceneProperty::Font);
        tracker.mark_scene(SceneProperty::ZoomLevel);
        tracker.mark_scene(SceneProperty::Font);
        assert!(!tracker.is_clean());

        assert_eq!(
            tracker.drain_scene(),
            vec![SceneProperty::ZoomLevel, SceneProperty::Font]
        );
        assert!(tracker.is_clean());
        assert!(tracker.drain_scene().is_empty());
    }

    #[test]
    fn axis_channels_are_independent() {
        let mut tracker = ChangeTracker::new();
        tracker.mark_axis(AxisOrientation::X, AxisProperty::Title);
        tracker.mark_axis(AxisOrientation::Z, AxisProperty::Range);

        assert!(tracker.axis_pending(AxisOrientation::X));
        assert!(!tracker.axis_pending(AxisOrientation::Y));
        assert_eq!(
            tracker.drain_axis(AxisOrientation::X),
            vec![AxisProperty::Title]
        );
        assert!(!tracker.is_clean());
        assert_eq!(
            tracker.drain_axis(AxisOrientation::Z),
            vec![AxisProperty::Range]
        );
        assert!(tracker.is_clean());
    }

    #[test]
    fn mark_all_covers_every_axis_property() {
        let mut tracker = ChangeTracker::new();
        tracker.mark_axis_all(AxisOrientation::Y);
        assert_eq!(
            tracker.drain_axis(AxisOrientation::Y),
            AxisProperty::ALL.to_vec()
        );
    }

    #[test]
    fn unattached_orientation_is_ignored() {
        let mut tracker = ChangeTracker::new();
        tracker.mark_axis(AxisOrientation::None, AxisProperty::Title);
        assert!(tracker.is_clean());
        assert!(tracker.drain_axis(AxisOrientation::None).is_empty());
    }

    #[test]
    fn keys_round_trip() {
        for p in SceneProperty::ALL {
            assert_eq!(SceneProperty::from_key(p.key()), Some(p));
        }
        for p in AxisProperty::ALL {
            assert_eq!(AxisProperty::from_key(p.key()), Some(p));
        }
        assert_eq!(SceneProperty::from_key(99), None);
    }
}
