// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data proxy contract.
//!
//! The controller never reads data values for drawing. It only asks the
//! attached [`DataProxy`] for the labels that category axes derive and for
//! the value ranges that auto-adjusting axes follow.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::axis::AxisOrientation;

/// A source of labeled graph data.
pub trait DataProxy: fmt::Debug + Send {
    /// Labels of the data rows.
    fn row_labels(&self) -> &[String];

    /// Labels of the data columns.
    fn column_labels(&self) -> &[String];

    /// The `(min, max)` extent of the data along an axis, or `None` when
    /// there is no data for it.
    fn value_range(&self, orientation: AxisOrientation) -> Option<(f32, f32)>;
}

/// Row-major bar data.
///
/// Along X the extent covers the row indices, along Z the column indices,
/// and along Y the values (always including zero, so bars grow from the
/// floor).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarDataProxy {
    rows: Vec<Vec<f32>>,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
}

impl BarDataProxy {
    /// Creates an empty proxy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a labeled row.
    pub fn add_row(&mut self, label: impl Into<String>, values: Vec<f32>) {
        self.rows.push(values);
        self.row_labels.push(label.into());
    }

    /// Replaces every row, dropping row labels.
    pub fn set_rows(&mut self, rows: Vec<Vec<f32>>) {
        self.rows = rows;
        self.row_labels.clear();
    }

    /// Replaces the row labels.
    pub fn set_row_labels(&mut self, labels: Vec<String>) {
        self.row_labels = labels;
    }

    /// Replaces the column labels.
    pub fn set_column_labels(&mut self, labels: Vec<String>) {
        self.column_labels = labels;
    }

    /// The rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl DataProxy for BarDataProxy {
    fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    fn value_range(&self, orientation: AxisOrientation) -> Option<(f32, f32)> {
        let index_extent = |count: usize| (count > 0).then(|| (0.0, (count - 1) as f32));
        match orientation {
            AxisOrientation::X => index_extent(self.rows.len()),
            AxisOrientation::Z => index_extent(self.column_count()),
            AxisOrientation::Y => {
                let mut values = self.rows.iter().flatten().copied().filter(|v| v.is_finite());
                let first = values.next()?;
                let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
                Some((min.min(0.0), max.max(0.0)))
            }
            AxisOrientation::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn empty_proxy_has_no_extent() {
        let proxy = BarDataProxy::new();
        assert_eq!(proxy.value_range(AxisOrientation::X), None);
        assert_eq!(proxy.value_range(AxisOrientation::Y), None);
    }

    #[test]
    fn extents_follow_rows_and_values() {
        let mut proxy = BarDataProxy::new();
        proxy.add_row("Mon", vec![3.0, 7.5, 1.0]);
        proxy.add_row("Tue", vec![2.0, 4.0]);
        assert_eq!(proxy.value_range(AxisOrientation::X), Some((0.0, 1.0)));
        assert_eq!(proxy.value_range(AxisOrientation::Z), Some((0.0, 2.0)));
        assert_eq!(proxy.value_range(AxisOrientation::Y), Some((0.0, 7.5)));
        assert_eq!(proxy.row_labels(), ["Mon", "Tue"]);
    }

    #[test]
    fn negative_values_extend_below_zero() {
        let mut proxy = BarDataProxy::new();
        proxy.set_rows(vec![vec![-4.0, -1.0]]);
        assert_eq!(proxy.value_range(AxisOrientation::Y), Some((-4.0, 0.0)));
        assert!(proxy.row_labels().is_empty());
    }
}
