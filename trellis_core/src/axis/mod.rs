// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category and value axes.
//!
//! An [`Axis`] is created by the application, handed to a
//! [`Controller`](crate::controller::Controller) slot (which takes ownership),
//! and mutated through setters. Every successful setter stores the new value
//! and records an [`AxisChange`]; the controller consumes those records and
//! turns them into dirty keys. Rejected input leaves the axis untouched and
//! returns a [`PropertyError`].
//!
//! Two kinds of axis share this type:
//!
//! - **Category** axes are ordinal bins. Labels are either set explicitly or
//!   derived from the controller's data proxy. Equal bounds are allowed,
//!   negative ones are not.
//! - **Value** axes are continuous. Labels are generated from the
//!   [`ValueAxisFormatter`] and the label format; the bounds must satisfy
//!   `min < max` and whatever the formatter's mapping can represent.

mod formatter;
mod id;
mod label_format;

pub use formatter::{
    GridParams, GridPositions, LinearMapping, LogMapping, ValueAxisFormatter, ValueMapping,
};
pub use id::{AxisId, AxisOrientation, AxisType};
pub use label_format::{LabelFormat, MAX_LABEL_FIELD};

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::PropertyError;

/// Label format of a freshly created value axis.
pub const DEFAULT_LABEL_FORMAT: &str = "%.2f";

/// A change notification recorded by an axis setter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisChange {
    /// Category or value.
    Type,
    /// Title text.
    Title,
    /// Label strings, or the explicit-label flag.
    Labels,
    /// Minimum or maximum.
    Range,
    /// Segment count.
    SegmentCount,
    /// Subsegment count.
    SubSegmentCount,
    /// Auto-adjust-range flag.
    AutoAdjustRange,
    /// Label format.
    LabelFormat,
    /// Formatter replaced.
    Formatter,
}

/// A graph axis.
///
/// See the [module documentation](self) for the category/value split.
#[derive(Debug)]
pub struct Axis {
    id: AxisId,
    orientation: AxisOrientation,
    axis_type: AxisType,
    title: String,
    labels: Vec<String>,
    labels_explicit: bool,
    /// Generated value-axis labels are out of date.
    labels_stale: bool,
    min: f32,
    max: f32,
    auto_adjust_range: bool,
    segment_count: u32,
    sub_segment_count: u32,
    label_format: String,
    formatter: ValueAxisFormatter,
    changes: Vec<AxisChange>,
}

impl Axis {
    /// Creates an axis of the given type with default settings.
    ///
    /// Defaults: range `0..=10`, auto-adjust on, 5 segments, 1 subsegment,
    /// label format `"%.2f"`, linear formatter, empty title.
    #[must_use]
    pub fn new(axis_type: AxisType) -> Self {
        let mut formatter = ValueAxisFormatter::new();
        formatter.attach();
        Self {
            id: AxisId::next(),
            orientation: AxisOrientation::None,
            axis_type,
            title: String::new(),
            labels: Vec::new(),
            labels_explicit: false,
            labels_stale: true,
            min: 0.0,
            max: 10.0,
            auto_adjust_range: true,
            segment_count: 5,
            sub_segment_count: 1,
            label_format: String::from(DEFAULT_LABEL_FORMAT),
            formatter,
            changes: Vec::new(),
        }
    }

    /// Creates a category axis.
    #[must_use]
    pub fn category() -> Self {
        Self::new(AxisType::Category)
    }

    /// Creates a value axis.
    #[must_use]
    pub fn value() -> Self {
        Self::new(AxisType::Value)
    }

    /// Returns this axis instance's id.
    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Returns the slot this axis is attached to.
    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    /// Returns the axis type.
    #[must_use]
    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the labels.
    ///
    /// Value-axis labels are regenerated by
    /// [`recalculate_if_needed`](Self::recalculate_if_needed), which the
    /// controller runs in every sync pass.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns `true` if the labels were set explicitly rather than derived.
    #[must_use]
    pub fn labels_explicitly_set(&self) -> bool {
        self.labels_explicit
    }

    /// Returns the minimum.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Returns the maximum.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Returns `true` if the range follows the data.
    #[must_use]
    pub fn auto_adjust_range(&self) -> bool {
        self.auto_adjust_range
    }

    /// Returns the segment count.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    /// Returns the subsegment count.
    #[must_use]
    pub fn sub_segment_count(&self) -> u32 {
        self.sub_segment_count
    }

    /// Returns the label format.
    #[must_use]
    pub fn label_format(&self) -> &str {
        &self.label_format
    }

    /// Returns the formatter. Its positions may be stale until the next
    /// [`recalculate_if_needed`](Self::recalculate_if_needed).
    #[must_use]
    pub fn formatter(&self) -> &ValueAxisFormatter {
        &self.formatter
    }

    /// Category axes accept `min == max`; value axes do not.
    #[must_use]
    pub fn allow_min_max_same(&self) -> bool {
        self.axis_type == AxisType::Category
    }

    /// Returns the formatter input for the current axis state.
    #[must_use]
    pub fn grid_params(&self) -> GridParams {
        GridParams {
            min: self.min,
            max: self.max,
            segment_count: self.segment_count,
            sub_segment_count: self.sub_segment_count,
        }
    }

    // -- Setters --

    /// Changes the axis type.
    ///
    /// Switching to category drops generated labels; switching to value drops
    /// category labels and widens an empty range to `min..=min + 1`.
    pub fn set_type(&mut self, axis_type: AxisType) {
        if self.axis_type == axis_type {
            return;
        }
        self.axis_type = axis_type;
        self.labels.clear();
        self.labels_explicit = false;
        self.labels_stale = true;
        if axis_type == AxisType::Value {
            if self.min >= self.max {
                self.max = self.min + 1.0;
                self.notify(AxisChange::Range);
            }
            self.formatter.mark_dirty();
        }
        self.notify(AxisChange::Type);
        self.notify(AxisChange::Labels);
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title != title {
            self.title = title;
            self.notify(AxisChange::Title);
        }
    }

    /// Sets category labels.
    ///
    /// A non-empty list becomes the explicit label set and stops derivation
    /// from data. An empty list clears the explicit flag so labels are derived
    /// from data again. Value-axis labels are generated and cannot be set.
    pub fn set_labels(&mut self, labels: Vec<String>) -> Result<(), PropertyError> {
        if self.axis_type == AxisType::Value {
            return PropertyError::NotApplicable {
                property: "labels",
                axis_type: self.axis_type,
            }
            .reject();
        }
        let explicit = !labels.is_empty();
        if self.labels != labels || self.labels_explicit != explicit {
            self.labels = labels;
            self.labels_explicit = explicit;
            self.notify(AxisChange::Labels);
        }
        Ok(())
    }

    /// Sets both bounds and turns auto-adjust off.
    pub fn set_range(&mut self, min: f32, max: f32) -> Result<(), PropertyError> {
        self.validate_range(min, max)?;
        self.set_auto_adjust_range(false);
        self.apply_range(min, max);
        Ok(())
    }

    /// Sets the minimum and turns auto-adjust off.
    ///
    /// A maximum below the new minimum is raised to it (or just above it when
    /// equal bounds are not allowed).
    pub fn set_min(&mut self, min: f32) -> Result<(), PropertyError> {
        let mut max = self.max.max(min);
        if max == min && !self.allow_min_max_same() {
            max = min + 1.0;
        }
        self.set_range(min, max)
    }

    /// Sets the maximum and turns auto-adjust off.
    ///
    /// A minimum above the new maximum is lowered to it (or just below it when
    /// equal bounds are not allowed).
    pub fn set_max(&mut self, max: f32) -> Result<(), PropertyError> {
        let mut min = self.min.min(max);
        if max == min && !self.allow_min_max_same() {
            min = max - 1.0;
        }
        self.set_range(min, max)
    }

    /// Sets the segment count (value axes).
    pub fn set_segment_count(&mut self, count: u32) -> Result<(), PropertyError> {
        self.check_value_only("segment count")?;
        if count < 1 {
            return PropertyError::InvalidCount {
                property: "segment count",
                value: count,
            }
            .reject();
        }
        if self.segment_count != count {
            self.segment_count = count;
            self.formatter.mark_dirty();
            self.notify(AxisChange::SegmentCount);
        }
        Ok(())
    }

    /// Sets the subsegment count (value axes).
    pub fn set_sub_segment_count(&mut self, count: u32) -> Result<(), PropertyError> {
        self.check_value_only("subsegment count")?;
        if count < 1 {
            return PropertyError::InvalidCount {
                property: "subsegment count",
                value: count,
            }
            .reject();
        }
        if self.sub_segment_count != count {
            self.sub_segment_count = count;
            self.formatter.mark_dirty();
            self.notify(AxisChange::SubSegmentCount);
        }
        Ok(())
    }

    /// Makes the range follow the data (`true`) or stay where it is set.
    pub fn set_auto_adjust_range(&mut self, enabled: bool) {
        if self.auto_adjust_range != enabled {
            self.auto_adjust_range = enabled;
            self.notify(AxisChange::AutoAdjustRange);
        }
    }

    /// Sets the printf-style label format (value axes).
    ///
    /// Rejected if the directive's width or precision exceeds
    /// [`MAX_LABEL_FIELD`].
    pub fn set_label_format(&mut self, format: impl Into<String>) -> Result<(), PropertyError> {
        self.check_value_only("label format")?;
        let format = format.into();
        if let Err(err) = LabelFormat::parse(&format).check_limits() {
            return err.reject();
        }
        if self.label_format != format {
            self.label_format = format;
            self.labels_stale = true;
            self.notify(AxisChange::LabelFormat);
        }
        Ok(())
    }

    /// Replaces the formatter (value axes).
    ///
    /// The axis takes ownership and attaches it. Rejected if the current range
    /// cannot be represented by the new formatter's mapping.
    pub fn set_formatter(&mut self, formatter: ValueAxisFormatter) -> Result<(), PropertyError> {
        self.check_value_only("formatter")?;
        if let Some(reason) = mapping_violation(&formatter, self.min, self.max) {
            return PropertyError::InvalidRange {
                min: self.min,
                max: self.max,
                reason,
            }
            .reject();
        }
        self.formatter = formatter;
        self.formatter.attach();
        self.labels_stale = true;
        self.notify(AxisChange::Formatter);
        Ok(())
    }

    // -- Derived state --

    /// Recomputes formatter positions and generated labels if stale.
    ///
    /// Returns `true` if the labels changed. Category axes are untouched.
    pub fn recalculate_if_needed(&mut self) -> bool {
        if self.axis_type != AxisType::Value {
            return false;
        }
        let params = self.grid_params();
        let recalculated = self.formatter.recalculate_if_needed(&params);
        if !(recalculated || self.labels_stale) {
            return false;
        }
        self.labels_stale = false;
        let labels = self.formatter.label_strings(&self.label_format);
        if labels == self.labels {
            return false;
        }
        self.labels = labels;
        true
    }

    /// Returns a detached formatter copy holding up-to-date positions.
    #[must_use]
    pub fn formatter_snapshot(&mut self) -> ValueAxisFormatter {
        let params = self.grid_params();
        self.formatter.snapshot(&params)
    }

    // -- Controller plumbing --

    pub(crate) fn set_orientation(&mut self, orientation: AxisOrientation) {
        self.orientation = orientation;
    }

    /// Stores labels derived from data unless explicit labels are set.
    /// Returns `true` if the labels changed.
    pub(crate) fn set_data_labels(&mut self, labels: &[String]) -> bool {
        if self.labels_explicit || self.axis_type != AxisType::Category || self.labels == labels {
            return false;
        }
        self.labels = labels.to_vec();
        self.notify(AxisChange::Labels);
        true
    }

    /// Applies a data-driven range, leaving auto-adjust on.
    /// Returns `true` if the range changed.
    pub(crate) fn set_range_auto(&mut self, min: f32, max: f32) -> bool {
        if self.validate_range_quiet(min, max).is_some() {
            return false;
        }
        self.apply_range(min, max)
    }

    pub(crate) fn take_changes(&mut self) -> Vec<AxisChange> {
        core::mem::take(&mut self.changes)
    }

    fn notify(&mut self, change: AxisChange) {
        if !self.changes.contains(&change) {
            self.changes.push(change);
        }
    }

    fn apply_range(&mut self, min: f32, max: f32) -> bool {
        if self.min == min && self.max == max {
            return false;
        }
        self.min = min;
        self.max = max;
        self.formatter.mark_dirty();
        self.notify(AxisChange::Range);
        true
    }

    fn check_value_only(&self, property: &'static str) -> Result<(), PropertyError> {
        if self.axis_type == AxisType::Value {
            Ok(())
        } else {
            PropertyError::NotApplicable {
                property,
                axis_type: self.axis_type,
            }
            .reject()
        }
    }

    fn validate_range(&self, min: f32, max: f32) -> Result<(), PropertyError> {
        match self.validate_range_quiet(min, max) {
            None => Ok(()),
            Some(reason) => PropertyError::InvalidRange { min, max, reason }.reject(),
        }
    }

    fn validate_range_quiet(&self, min: f32, max: f32) -> Option<&'static str> {
        if !(min.is_finite() && max.is_finite()) {
            return Some("bounds must be finite");
        }
        if min > max {
            return Some("minimum exceeds maximum");
        }
        if min == max && !self.allow_min_max_same() {
            return Some("minimum equals maximum");
        }
        match self.axis_type {
            AxisType::Category if min < 0.0 => Some("category axes only accept non-negative bounds"),
            AxisType::Category => None,
            AxisType::Value => mapping_violation(&self.formatter, min, max),
        }
    }
}

fn mapping_violation(formatter: &ValueAxisFormatter, min: f32, max: f32) -> Option<&'static str> {
    if !formatter.allow_negatives() && min < 0.0 {
        return Some("formatter does not allow negative values");
    }
    if !formatter.allow_zero() && min <= 0.0 && max >= 0.0 {
        return Some("formatter does not allow zero");
    }
    None
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn value_axis_defaults() {
        let axis = Axis::value();
        assert_eq!(axis.orientation(), AxisOrientation::None);
        assert_eq!((axis.min(), axis.max()), (0.0, 10.0));
        assert_eq!(axis.segment_count(), 5);
        assert_eq!(axis.sub_segment_count(), 1);
        assert!(axis.auto_adjust_range());
        assert_eq!(axis.label_format(), DEFAULT_LABEL_FORMAT);
        assert!(axis.formatter().is_attached());
    }

    #[test]
    fn grid_for_default_value_axis() {
        let mut axis = Axis::value();
        assert!(axis.recalculate_if_needed());
        assert_eq!(
            axis.formatter().grid_positions(),
            &[0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0]
        );
        assert_eq!(
            axis.labels(),
            strings(&["0.00", "2.00", "4.00", "6.00", "8.00", "10.00"])
        );
        assert!(!axis.recalculate_if_needed());
    }

    #[test]
    fn set_range_validates_and_disables_auto_adjust() {
        let mut axis = Axis::value();
        assert!(axis.set_range(5.0, 5.0).is_err());
        assert!(axis.set_range(6.0, 2.0).is_err());
        assert!(axis.set_range(0.0, f32::NAN).is_err());
        assert_eq!((axis.min(), axis.max()), (0.0, 10.0));
        assert!(axis.auto_adjust_range());
        assert!(axis.take_changes().is_empty());

        axis.set_range(-5.0, 5.0).unwrap();
        assert_eq!((axis.min(), axis.max()), (-5.0, 5.0));
        assert!(!axis.auto_adjust_range());
        assert!(axis.formatter().needs_recalculate());
        assert_eq!(
            axis.take_changes(),
            vec![AxisChange::AutoAdjustRange, AxisChange::Range]
        );
    }

    #[test]
    fn category_axis_bounds() {
        let mut axis = Axis::category();
        axis.set_range(3.0, 3.0).unwrap();
        assert!(matches!(
            axis.set_range(-1.0, 3.0),
            Err(PropertyError::InvalidRange { .. })
        ));
        assert_eq!((axis.min(), axis.max()), (3.0, 3.0));
    }

    #[test]
    fn set_min_and_max_keep_range_ordered() {
        let mut axis = Axis::value();
        axis.set_min(20.0).unwrap();
        assert_eq!((axis.min(), axis.max()), (20.0, 21.0));
        axis.set_max(4.0).unwrap();
        assert_eq!((axis.min(), axis.max()), (3.0, 4.0));

        let mut category = Axis::category();
        category.set_min(12.0).unwrap();
        assert_eq!((category.min(), category.max()), (12.0, 12.0));
    }

    #[test]
    fn segment_counts_must_be_positive() {
        let mut axis = Axis::value();
        assert_eq!(
            axis.set_segment_count(0),
            Err(PropertyError::InvalidCount {
                property: "segment count",
                value: 0
            })
        );
        assert!(axis.set_sub_segment_count(0).is_err());
        assert_eq!(axis.segment_count(), 5);

        axis.set_segment_count(2).unwrap();
        axis.set_sub_segment_count(3).unwrap();
        axis.recalculate_if_needed();
        assert_eq!(axis.formatter().grid_positions().len(), 3);
        assert_eq!(axis.formatter().sub_grid_positions()[0].len(), 2);
    }

    #[test]
    fn value_only_properties_on_category_axis() {
        let mut axis = Axis::category();
        assert!(matches!(
            axis.set_segment_count(3),
            Err(PropertyError::NotApplicable { .. })
        ));
        assert!(axis.set_label_format("%d").is_err());
        assert!(axis.set_formatter(ValueAxisFormatter::new()).is_err());
    }

    #[test]
    fn value_axis_labels_cannot_be_set() {
        let mut axis = Axis::value();
        assert!(axis.set_labels(strings(&["a"])).is_err());
        assert!(axis.labels().is_empty());
    }

    #[test]
    fn explicit_labels_block_data_labels() {
        let mut axis = Axis::category();
        assert!(axis.set_data_labels(&strings(&["Mon", "Tue"])));
        assert!(!axis.labels_explicitly_set());

        axis.set_labels(strings(&["A", "B", "C"])).unwrap();
        assert!(axis.labels_explicitly_set());
        assert!(!axis.set_data_labels(&strings(&["Mon", "Tue"])));
        assert_eq!(axis.labels(), strings(&["A", "B", "C"]));

        axis.set_labels(Vec::new()).unwrap();
        assert!(!axis.labels_explicitly_set());
        assert!(axis.set_data_labels(&strings(&["Mon", "Tue"])));
        assert_eq!(axis.labels(), strings(&["Mon", "Tue"]));
    }

    #[test]
    fn repeated_setter_records_one_change() {
        let mut axis = Axis::value();
        axis.set_title("Sales");
        axis.set_title("Sales");
        axis.set_title("Revenue");
        assert_eq!(axis.take_changes(), vec![AxisChange::Title]);
        assert!(axis.take_changes().is_empty());
    }

    #[test]
    fn label_format_regenerates_labels() {
        let mut axis = Axis::value();
        axis.set_segment_count(2).unwrap();
        axis.recalculate_if_needed();
        axis.set_label_format("%d m").unwrap();
        assert!(axis.recalculate_if_needed());
        assert_eq!(axis.labels(), strings(&["0 m", "5 m", "10 m"]));
    }

    #[test]
    fn oversized_label_format_is_rejected() {
        let mut axis = Axis::value();
        axis.set_segment_count(1).unwrap();
        axis.recalculate_if_needed();
        let _ = axis.take_changes();

        assert!(matches!(
            axis.set_label_format("%.70000f"),
            Err(PropertyError::LabelFieldTooLarge { value: 70_000, .. })
        ));
        assert!(axis.set_label_format("%70000d").is_err());
        assert_eq!(axis.label_format(), DEFAULT_LABEL_FORMAT);
        assert!(axis.take_changes().is_empty());
        assert!(!axis.recalculate_if_needed());
    }

    #[test]
    fn log_formatter_rejects_zero_bounds() {
        let mut axis = Axis::value();
        assert!(
            axis.set_formatter(ValueAxisFormatter::with_mapping(LogMapping::new()))
                .is_err(),
            "default range 0..10 includes zero"
        );
        axis.set_range(1.0, 1000.0).unwrap();
        axis.set_formatter(ValueAxisFormatter::with_mapping(LogMapping::new()))
            .unwrap();
        assert!(axis.formatter().is_attached());
        assert!(axis.set_range(0.0, 10.0).is_err());
        assert!(axis.set_range(-1.0, 10.0).is_err());
        assert_eq!((axis.min(), axis.max()), (1.0, 1000.0));
        assert!(axis.recalculate_if_needed());
        assert_eq!(axis.labels().len(), 4);
    }

    #[test]
    fn type_switch_resets_labels() {
        let mut axis = Axis::category();
        axis.set_labels(strings(&["a", "b"])).unwrap();
        axis.set_range(0.0, 0.0).unwrap();
        axis.take_changes();

        axis.set_type(AxisType::Value);
        assert!(axis.labels().is_empty());
        assert!(!axis.labels_explicitly_set());
        assert_eq!((axis.min(), axis.max()), (0.0, 1.0));
        let changes = axis.take_changes();
        assert!(changes.contains(&AxisChange::Type));
        assert!(changes.contains(&AxisChange::Range));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut axis = Axis::value();
        let snapshot = axis.formatter_snapshot();
        assert!(!snapshot.is_attached());
        assert_eq!(snapshot.grid_positions().len(), 6);
        axis.set_segment_count(1).unwrap();
        assert_eq!(snapshot.grid_positions().len(), 6);
    }
}
