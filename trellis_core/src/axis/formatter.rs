// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized grid, subgrid and label positions for value axes.
//!
//! A [`ValueAxisFormatter`] turns an axis range and segment counts into
//! positions normalized to `[0, 1]` over the range, and converts between raw
//! values and those positions. The conversion itself is pluggable through
//! [`ValueMapping`]: [`LinearMapping`] is the default, [`LogMapping`] places
//! values in log space.
//!
//! Recalculation is lazy. Mutating the owning axis only marks the formatter
//! dirty; the arrays are rebuilt by
//! [`recalculate_if_needed`](ValueAxisFormatter::recalculate_if_needed) when
//! the formatter is both attached to an axis and dirty, so a burst of
//! mutations between two frames costs one rebuild.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::label_format::LabelFormat;

/// The axis state a formatter computes positions from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// Axis minimum.
    pub min: f32,
    /// Axis maximum.
    pub max: f32,
    /// Number of segments between grid lines (at least 1).
    pub segment_count: u32,
    /// Number of subsegments per segment (at least 1).
    pub sub_segment_count: u32,
}

/// Computed positions, all normalized to `[0, 1]` over the axis range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridPositions {
    /// Grid line positions, first `0.0`, last exactly `1.0`.
    pub grid: Vec<f32>,
    /// One row per segment holding its interior subgrid line positions.
    pub sub_grid: Vec<Vec<f32>>,
    /// Label positions.
    pub labels: Vec<f32>,
}

impl GridPositions {
    /// Evenly spaced grid: `segments + 1` grid and label positions, and
    /// `segments` rows of `sub_segments - 1` subgrid positions.
    #[must_use]
    pub fn linear(segment_count: u32, sub_segment_count: u32) -> Self {
        let segments = segment_count.max(1);
        let sub_segments = sub_segment_count.max(1);

        let mut grid: Vec<f32> = (0..segments)
            .map(|i| i as f32 / segments as f32)
            .collect();
        grid.push(1.0);

        let sub_grid = (0..segments)
            .map(|i| {
                (1..sub_segments)
                    .map(|j| sub_grid_position(i, j, segments, sub_segments))
                    .collect()
            })
            .collect();

        Self {
            labels: grid.clone(),
            grid,
            sub_grid,
        }
    }
}

/// Position of subgrid line `j` inside segment `i`.
///
/// Computed in floating point so that `segments * sub_segments` never
/// overflows.
fn sub_grid_position(i: u32, j: u32, segments: u32, sub_segments: u32) -> f32 {
    let sub_segments = f64::from(sub_segments);
    let line = f64::from(i) * sub_segments + f64::from(j);
    (line / (f64::from(segments) * sub_segments)) as f32
}

/// How raw axis values map to normalized positions.
///
/// Implementations override [`position_at`](Self::position_at) and
/// [`value_at`](Self::value_at) for non-linear axes. Grid generation stays
/// linear in position space unless [`recalculate`](Self::recalculate) is also
/// overridden.
pub trait ValueMapping: fmt::Debug + Send + Sync {
    /// Normalized position of `value` on an axis spanning `min..=max`.
    fn position_at(&self, min: f32, max: f32, value: f32) -> f32 {
        (value - min) / (max - min)
    }

    /// Raw value at normalized `position` on an axis spanning `min..=max`.
    fn value_at(&self, min: f32, max: f32, position: f32) -> f32 {
        position * (max - min) + min
    }

    /// Whether negative axis bounds can be mapped.
    fn allow_negatives(&self) -> bool {
        true
    }

    /// Whether an axis range may include zero.
    fn allow_zero(&self) -> bool {
        true
    }

    /// Computes grid, subgrid and label positions.
    fn recalculate(&self, params: &GridParams) -> GridPositions {
        GridPositions::linear(params.segment_count, params.sub_segment_count)
    }

    /// Returns a boxed copy of this mapping.
    fn box_clone(&self) -> Box<dyn ValueMapping>;
}

/// Straight linear interpolation between the axis bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearMapping;

impl ValueMapping for LinearMapping {
    fn box_clone(&self) -> Box<dyn ValueMapping> {
        Box::new(*self)
    }
}

/// Grid positions closer than this to an edge merge into it.
const EDGE_EPSILON: f32 = 1e-6;

/// Logarithmic mapping for strictly positive ranges.
///
/// With a `base` greater than one, grid lines sit on the integer powers of
/// the base that fall inside the range (plus the range edges), and the axis
/// segment count is ignored. With a base of `0.0` the axis segment count is
/// used and segments are evenly spaced in log space.
///
/// With `auto_sub_grid`, subgrid lines sit at the integer multiples of each
/// segment's lower power (`2·10ⁿ … 9·10ⁿ` for base 10); otherwise each
/// segment is split into the axis subsegment count in value space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogMapping {
    base: f32,
    auto_sub_grid: bool,
}

impl Default for LogMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl LogMapping {
    /// Base-10 mapping with automatic subgrid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: 10.0,
            auto_sub_grid: true,
        }
    }

    /// Sets the grid base. Values in `(0, 1]` or negative are treated as `0.0`.
    #[must_use]
    pub fn with_base(mut self, base: f32) -> Self {
        self.base = if base > 1.0 { base } else { 0.0 };
        self
    }

    /// Enables or disables the automatic subgrid.
    #[must_use]
    pub const fn with_auto_sub_grid(mut self, enabled: bool) -> Self {
        self.auto_sub_grid = enabled;
        self
    }

    /// Returns the grid base, `0.0` when segment counts drive the grid.
    #[must_use]
    pub const fn base(&self) -> f32 {
        self.base
    }

    /// Returns whether the automatic subgrid is enabled.
    #[must_use]
    pub const fn auto_sub_grid(&self) -> bool {
        self.auto_sub_grid
    }

    fn sub_grid_row(&self, min: f32, max: f32, from: f32, to: f32, sub_segments: u32) -> Vec<f32> {
        let v0 = f64::from(self.value_at(min, max, from));
        let v1 = f64::from(self.value_at(min, max, to));
        let values: Vec<f64> = if self.auto_sub_grid && self.base > 1.0 {
            let base = f64::from(self.base);
            let power = base.powf((v0.ln() / base.ln() + 1e-6).floor());
            (2..)
                .map(|m| f64::from(m) * power)
                .take_while(|v| *v < v1 * (1.0 - 1e-6))
                .filter(|v| *v > v0 * (1.0 + 1e-6))
                .collect()
        } else {
            let n = sub_segments.max(1);
            (1..n)
                .map(|j| v0 + (v1 - v0) * f64::from(j) / f64::from(n))
                .collect()
        };
        values
            .into_iter()
            .map(|v| self.position_at(min, max, v as f32))
            .collect()
    }
}

impl ValueMapping for LogMapping {
    fn position_at(&self, min: f32, max: f32, value: f32) -> f32 {
        let (lmin, lmax) = (f64::from(min).ln(), f64::from(max).ln());
        ((f64::from(value).ln() - lmin) / (lmax - lmin)) as f32
    }

    fn value_at(&self, min: f32, max: f32, position: f32) -> f32 {
        let (min, max) = (f64::from(min), f64::from(max));
        (min * (max / min).powf(f64::from(position))) as f32
    }

    fn allow_negatives(&self) -> bool {
        false
    }

    fn allow_zero(&self) -> bool {
        false
    }

    fn recalculate(&self, params: &GridParams) -> GridPositions {
        let grid = if self.base > 1.0 {
            let base = f64::from(self.base).ln();
            let lmin = f64::from(params.min).ln() / base;
            let lmax = f64::from(params.max).ln() / base;
            let mut grid = Vec::new();
            grid.push(0.0);
            let mut power = lmin.ceil();
            while power < lmax {
                let position = ((power - lmin) / (lmax - lmin)) as f32;
                if position > EDGE_EPSILON && position < 1.0 - EDGE_EPSILON {
                    grid.push(position);
                }
                power += 1.0;
            }
            grid.push(1.0);
            grid
        } else {
            GridPositions::linear(params.segment_count, 1).grid
        };

        let sub_grid = grid
            .windows(2)
            .map(|w| {
                self.sub_grid_row(
                    params.min,
                    params.max,
                    w[0],
                    w[1],
                    params.sub_segment_count,
                )
            })
            .collect();

        GridPositions {
            labels: grid.clone(),
            grid,
            sub_grid,
        }
    }

    fn box_clone(&self) -> Box<dyn ValueMapping> {
        Box::new(*self)
    }
}

/// Per-axis formatter: cached positions plus the mapping that produced them.
///
/// A formatter owned by an axis is *attached* and recalculates lazily from the
/// axis state. Copies made with [`create_new_instance`](Self::create_new_instance)
/// or [`snapshot`](Self::snapshot) are detached: they keep the positions they
/// were given and never recalculate, so a renderer can hold one without
/// touching the live axis.
#[derive(Debug)]
pub struct ValueAxisFormatter {
    mapping: Box<dyn ValueMapping>,
    attached: bool,
    needs_recalculate: bool,
    min: f32,
    max: f32,
    positions: GridPositions,
    format_cache: Option<(String, LabelFormat)>,
}

impl Default for ValueAxisFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValueAxisFormatter {
    fn clone(&self) -> Self {
        Self {
            mapping: self.mapping.box_clone(),
            attached: self.attached,
            needs_recalculate: self.needs_recalculate,
            min: self.min,
            max: self.max,
            positions: self.positions.clone(),
            format_cache: self.format_cache.clone(),
        }
    }
}

impl ValueAxisFormatter {
    /// Creates a detached linear formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mapping(LinearMapping)
    }

    /// Creates a detached formatter with the given mapping.
    #[must_use]
    pub fn with_mapping(mapping: impl ValueMapping + 'static) -> Self {
        Self::from_boxed(Box::new(mapping))
    }

    fn from_boxed(mapping: Box<dyn ValueMapping>) -> Self {
        Self {
            mapping,
            attached: false,
            needs_recalculate: true,
            min: 0.0,
            max: 1.0,
            positions: GridPositions::default(),
            format_cache: None,
        }
    }

    /// Creates a detached, empty formatter with the same mapping.
    #[must_use]
    pub fn create_new_instance(&self) -> Self {
        Self::from_boxed(self.mapping.box_clone())
    }

    /// Returns the value mapping.
    #[must_use]
    pub fn mapping(&self) -> &dyn ValueMapping {
        self.mapping.as_ref()
    }

    /// Returns `true` if an axis owns this formatter.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
        self.needs_recalculate = true;
    }

    /// Returns `true` if the cached positions are stale.
    #[must_use]
    pub fn needs_recalculate(&self) -> bool {
        self.needs_recalculate
    }

    /// Marks the cached positions stale.
    pub fn mark_dirty(&mut self) {
        self.needs_recalculate = true;
    }

    /// Recalculates if attached and stale. Returns whether it did.
    pub fn recalculate_if_needed(&mut self, params: &GridParams) -> bool {
        if self.attached && self.needs_recalculate {
            self.recalculate(params);
            true
        } else {
            false
        }
    }

    /// Unconditionally recomputes every position from `params`.
    pub fn recalculate(&mut self, params: &GridParams) {
        self.min = params.min;
        self.max = params.max;
        self.positions = self.mapping.recalculate(params);
        self.needs_recalculate = false;
    }

    /// Recalculates if needed, then deep-copies the computed state into
    /// `copy`. The copy's own attachment is left unchanged.
    pub fn populate_copy(&mut self, params: &GridParams, copy: &mut Self) {
        self.recalculate_if_needed(params);
        copy.mapping = self.mapping.box_clone();
        copy.min = self.min;
        copy.max = self.max;
        copy.positions = self.positions.clone();
        copy.needs_recalculate = false;
    }

    /// Returns a detached copy holding up-to-date positions.
    #[must_use]
    pub fn snapshot(&mut self, params: &GridParams) -> Self {
        let mut copy = self.create_new_instance();
        self.populate_copy(params, &mut copy);
        copy
    }

    /// Range minimum at the last recalculation.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Range maximum at the last recalculation.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Normalized position of a raw value.
    #[must_use]
    pub fn position_at(&self, value: f32) -> f32 {
        self.mapping.position_at(self.min, self.max, value)
    }

    /// Raw value at a normalized position.
    #[must_use]
    pub fn value_at(&self, position: f32) -> f32 {
        self.mapping.value_at(self.min, self.max, position)
    }

    /// Whether the mapping accepts negative bounds.
    #[must_use]
    pub fn allow_negatives(&self) -> bool {
        self.mapping.allow_negatives()
    }

    /// Whether the mapping accepts a range including zero.
    #[must_use]
    pub fn allow_zero(&self) -> bool {
        self.mapping.allow_zero()
    }

    /// Grid line positions.
    #[must_use]
    pub fn grid_positions(&self) -> &[f32] {
        &self.positions.grid
    }

    /// Subgrid line positions, one row per segment.
    #[must_use]
    pub fn sub_grid_positions(&self) -> &[Vec<f32>] {
        &self.positions.sub_grid
    }

    /// Label positions.
    #[must_use]
    pub fn label_positions(&self) -> &[f32] {
        &self.positions.labels
    }

    /// Renders `value` with a printf-style `format`.
    ///
    /// The parsed format is cached, so repeated calls with the same format
    /// string only parse once.
    pub fn string_for_value(&mut self, value: f32, format: &str) -> String {
        match &self.format_cache {
            Some((cached, parsed)) if cached == format => parsed.format(value),
            _ => {
                let parsed = LabelFormat::parse(format);
                let text = parsed.format(value);
                self.format_cache = Some((String::from(format), parsed));
                text
            }
        }
    }

    /// Renders a label for every label position.
    pub fn label_strings(&mut self, format: &str) -> Vec<String> {
        let values: Vec<f32> = self
            .positions
            .labels
            .iter()
            .map(|&p| self.value_at(p))
            .collect();
        values
            .into_iter()
            .map(|v| self.string_for_value(v, format))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn params(min: f32, max: f32, segments: u32, subs: u32) -> GridParams {
        GridParams {
            min,
            max,
            segment_count: segments,
            sub_segment_count: subs,
        }
    }

    fn attached() -> ValueAxisFormatter {
        let mut f = ValueAxisFormatter::new();
        f.attach();
        f
    }

    #[test]
    fn five_segments_over_zero_to_ten() {
        let mut f = attached();
        assert!(f.recalculate_if_needed(&params(0.0, 10.0, 5, 1)));
        assert_eq!(f.grid_positions(), &[0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(f.label_positions(), f.grid_positions());
        assert_eq!(f.sub_grid_positions().len(), 5);
        assert!(f.sub_grid_positions().iter().all(Vec::is_empty));
    }

    #[test]
    fn grid_is_strictly_increasing_and_ends_at_one() {
        for segments in 1..=37 {
            let g = GridPositions::linear(segments, 1);
            assert_eq!(g.grid.len(), segments as usize + 1);
            assert_eq!(g.grid[0], 0.0);
            assert_eq!(*g.grid.last().unwrap(), 1.0);
            assert!(g.grid.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn subgrid_excludes_segment_boundaries() {
        let g = GridPositions::linear(2, 4);
        assert_eq!(g.sub_grid, vec![vec![0.125_f32, 0.25, 0.375], vec![0.625, 0.75, 0.875]]);
    }

    #[test]
    fn linear_round_trip() {
        let mut f = attached();
        f.recalculate(&params(-40.0, 125.0, 4, 1));
        for v in [-40.0_f32, -3.5, 0.0, 17.25, 125.0] {
            assert!((f.value_at(f.position_at(v)) - v).abs() < 1e-4);
        }
        for p in [0.0_f32, 0.1, 0.5, 0.99, 1.0] {
            assert!((f.position_at(f.value_at(p)) - p).abs() < 1e-6);
        }
    }

    #[test]
    fn detached_formatter_never_recalculates() {
        let mut f = ValueAxisFormatter::new();
        assert!(!f.recalculate_if_needed(&params(0.0, 10.0, 5, 1)));
        assert!(f.grid_positions().is_empty());
    }

    #[test]
    fn clean_formatter_skips_recalculation() {
        let mut f = attached();
        assert!(f.recalculate_if_needed(&params(0.0, 10.0, 5, 1)));
        assert!(!f.recalculate_if_needed(&params(0.0, 20.0, 2, 1)));
        assert_eq!(f.max(), 10.0);
        f.mark_dirty();
        assert!(f.recalculate_if_needed(&params(0.0, 20.0, 2, 1)));
        assert_eq!(f.grid_positions(), &[0.0_f32, 0.5, 1.0]);
    }

    #[test]
    fn populate_copy_is_independent() {
        let mut source = attached();
        let p = params(0.0, 10.0, 5, 2);
        let mut copy = source.create_new_instance();
        assert!(!copy.is_attached());
        source.populate_copy(&p, &mut copy);
        assert_eq!(copy.grid_positions(), source.grid_positions());
        assert_eq!(copy.sub_grid_positions(), source.sub_grid_positions());
        assert_eq!(copy.max(), 10.0);

        source.mark_dirty();
        source.recalculate_if_needed(&params(0.0, 100.0, 2, 1));
        assert_eq!(copy.grid_positions().len(), 6);
        assert_eq!(copy.max(), 10.0);
        assert!(!copy.recalculate_if_needed(&p));
    }

    #[test]
    fn log_round_trip_and_restrictions() {
        let log = LogMapping::new();
        assert!(!log.allow_zero());
        assert!(!log.allow_negatives());
        for v in [1.0_f32, 3.0, 10.0, 250.0, 1000.0] {
            let p = log.position_at(1.0, 1000.0, v);
            assert!((log.value_at(1.0, 1000.0, p) - v).abs() / v < 1e-5);
        }
        assert!((log.position_at(1.0, 1000.0, 10.0) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn log_grid_sits_on_powers_of_base() {
        let mut f = ValueAxisFormatter::with_mapping(LogMapping::new());
        f.attach();
        f.recalculate_if_needed(&params(1.0, 1000.0, 5, 1));
        let grid = f.grid_positions();
        assert_eq!(grid.len(), 4);
        assert!((grid[1] - 1.0 / 3.0).abs() < 1e-6);
        assert!((grid[2] - 2.0 / 3.0).abs() < 1e-6);
        // 2..9 between each pair of decades
        assert_eq!(f.sub_grid_positions().len(), 3);
        assert!(f.sub_grid_positions().iter().all(|row| row.len() == 8));
    }

    #[test]
    fn log_without_base_uses_segment_count() {
        let mapping = LogMapping::new().with_base(0.0).with_auto_sub_grid(false);
        let g = mapping.recalculate(&params(1.0, 100.0, 4, 2));
        assert_eq!(g.grid, vec![0.0_f32, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(g.sub_grid.len(), 4);
        assert!(g.sub_grid.iter().all(|row| row.len() == 1));
    }

    #[test]
    fn subgrid_positions_do_not_overflow_large_counts() {
        let p = sub_grid_position(70_000, 1, 70_001, 70_000);
        assert!(p > 0.99 && p < 1.0);
        assert_eq!(sub_grid_position(1, 1, 2, 2), 0.75);
    }

    #[test]
    fn log_value_at_matches_decades() {
        let log = LogMapping::new();
        assert!((log.value_at(1.0, 1000.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((log.value_at(1.0, 1000.0, 2.0 / 3.0) - 100.0).abs() < 1e-3);
        assert!((log.value_at(1.0, 1000.0, 1.0) - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn labels_use_cached_format() {
        let mut f = attached();
        f.recalculate(&params(0.0, 10.0, 2, 1));
        assert_eq!(f.label_strings("%.1f"), vec!["0.0", "5.0", "10.0"]);
        assert_eq!(f.string_for_value(2.5, "%.1f"), "2.5");
        assert_eq!(f.string_for_value(2.5, "%d units"), "2 units");
    }
}
