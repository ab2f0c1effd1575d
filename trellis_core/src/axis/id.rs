// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis identity, orientation and type.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

static NEXT_AXIS_ID: AtomicU32 = AtomicU32::new(1);

/// A process-unique handle naming one axis instance.
///
/// Change notifications carry the id of the axis they came from so the
/// controller can tell whether the axis is still attached to one of its slots.
/// Ids are never reused within a process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(u32);

impl AxisId {
    pub(crate) fn next() -> Self {
        Self(NEXT_AXIS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisId({})", self.0)
    }
}

/// The controller slot an axis is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisOrientation {
    /// Not attached to any controller.
    #[default]
    None,
    /// Horizontal axis (rows for bar graphs).
    X,
    /// Vertical value axis.
    Y,
    /// Depth axis (columns for bar graphs).
    Z,
}

impl AxisOrientation {
    /// The three attachable slots, in push order.
    pub const SLOTS: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the slot index (0 for X, 1 for Y, 2 for Z).
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Self::X => Some(0),
            Self::Y => Some(1),
            Self::Z => Some(2),
            Self::None => None,
        }
    }
}

/// Whether an axis is discrete or continuous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisType {
    /// Discrete ordinal bins with optional text labels.
    Category,
    /// Continuous numeric range with generated labels.
    Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = AxisId::next();
        let b = AxisId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn slots_map_to_indices() {
        assert_eq!(AxisOrientation::X.slot(), Some(0));
        assert_eq!(AxisOrientation::Z.slot(), Some(2));
        assert_eq!(AxisOrientation::None.slot(), None);
        assert_eq!(AxisOrientation::default(), AxisOrientation::None);
    }
}
