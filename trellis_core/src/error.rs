// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by property setters.

use core::fmt;

use crate::axis::AxisType;

/// Why a property setter rejected its input.
///
/// A rejected value never takes effect: the getter keeps returning the
/// previous value and no dirty key is marked. Every rejection is also logged
/// at `warn` level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyError {
    /// A scalar lies outside its closed valid range.
    OutOfRange {
        /// Name of the rejected property.
        property: &'static str,
        /// The rejected value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
    /// An axis range the axis cannot represent.
    InvalidRange {
        /// Requested minimum.
        min: f32,
        /// Requested maximum.
        max: f32,
        /// Which rule the range broke.
        reason: &'static str,
    },
    /// A segment or subsegment count below one.
    InvalidCount {
        /// Name of the rejected property.
        property: &'static str,
        /// The rejected count.
        value: u32,
    },
    /// A label format width or precision above the supported maximum.
    LabelFieldTooLarge {
        /// `"width"` or `"precision"`.
        field: &'static str,
        /// The requested value.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// The property does not exist for this kind of axis.
    NotApplicable {
        /// Name of the rejected property.
        property: &'static str,
        /// Type of the axis the setter was called on.
        axis_type: AxisType,
    },
}

impl PropertyError {
    /// Logs the rejection and returns it as an `Err`.
    pub(crate) fn reject<T>(self) -> Result<T, Self> {
        tracing::warn!(error = %self, "property change rejected");
        Err(self)
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                property,
                value,
                min,
                max,
            } => write!(f, "{property} {value} is outside [{min}, {max}]"),
            Self::InvalidRange { min, max, reason } => {
                write!(f, "invalid axis range [{min}, {max}]: {reason}")
            }
            Self::InvalidCount { property, value } => {
                write!(f, "{property} must be at least 1, got {value}")
            }
            Self::LabelFieldTooLarge { field, value, max } => {
                write!(f, "label format {field} {value} exceeds {max}")
            }
            Self::NotApplicable {
                property,
                axis_type,
            } => write!(f, "{property} cannot be set on a {axis_type:?} axis"),
        }
    }
}

impl core::error::Error for PropertyError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_property() {
        let err = PropertyError::OutOfRange {
            property: "light strength",
            value: 15.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "light strength 15 is outside [0, 10]");

        let err = PropertyError::NotApplicable {
            property: "labels",
            axis_type: AxisType::Value,
        };
        assert_eq!(err.to_string(), "labels cannot be set on a Value axis");
    }

    #[test]
    fn reject_returns_err() {
        let err = PropertyError::InvalidCount {
            property: "segment count",
            value: 0,
        };
        assert_eq!(err.reject::<()>(), Err(err));
    }
}
