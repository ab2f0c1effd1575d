// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage tracking between frames.

use alloc::vec::Vec;

use trellis_core::axis::AxisOrientation;

/// What changed since the previous frame.
///
/// A backend can skip a frame whose damage is empty, and redraw only the
/// axis decorations when just axes changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DamageRegion {
    /// Everything needs redrawing.
    #[default]
    Full,
    /// Only the decorations (grid, subgrid, labels) of these axes changed.
    ///
    /// Sorted, without duplicates.
    Axes(Vec<AxisOrientation>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Damage covering one axis.
    #[must_use]
    pub fn axis(orientation: AxisOrientation) -> Self {
        Self::Axes(alloc::vec![orientation])
    }

    /// Returns `true` if nothing needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if the decorations of `orientation` need redrawing.
    #[must_use]
    pub fn covers_axis(&self, orientation: AxisOrientation) -> bool {
        match self {
            Self::Full => true,
            Self::Axes(axes) => axes.binary_search(&orientation).is_ok(),
            Self::None => false,
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&mut *self, other) {
            (Self::Full, _) | (_, Self::None) => {}
            (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (Self::Axes(a), Self::Axes(b)) => {
                a.extend_from_slice(b);
                a.sort_unstable();
                a.dedup();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn none_is_identity() {
        let mut damage = DamageRegion::None;
        damage.merge(&DamageRegion::None);
        assert!(damage.is_empty());
        damage.merge(&DamageRegion::axis(AxisOrientation::Z));
        assert_eq!(damage, DamageRegion::Axes(vec![AxisOrientation::Z]));
    }

    #[test]
    fn axes_merge_sorted_and_full_absorbs() {
        let mut damage = DamageRegion::axis(AxisOrientation::Z);
        damage.merge(&DamageRegion::axis(AxisOrientation::X));
        damage.merge(&DamageRegion::axis(AxisOrientation::Z));
        assert_eq!(
            damage,
            DamageRegion::Axes(vec![AxisOrientation::X, AxisOrientation::Z])
        );
        assert!(damage.covers_axis(AxisOrientation::X));
        assert!(!damage.covers_axis(AxisOrientation::Y));

        damage.merge(&DamageRegion::Full);
        assert_eq!(damage, DamageRegion::Full);
        damage.merge(&DamageRegion::axis(AxisOrientation::Y));
        assert_eq!(damage, DamageRegion::Full);
    }
}
