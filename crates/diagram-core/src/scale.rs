// File: crates/diagram-core/src/scale.rs
// Summary: Vertical value scale shared by cartesian charts ("nice" axis ceiling).

use crate::series::{max_value, DataPoint};
use crate::types::ROW_COUNT;

/// Round up to the next multiple of ten.
#[inline]
pub fn round_up_10(x: f64) -> f64 {
    (x / 10.0).ceil() * 10.0
}

/// Axis ceiling derived from the series maximum.
///
/// Two rounding passes: the raw maximum is rounded up to a multiple of ten and
/// split into [`ROW_COUNT`] rows; the row value is rounded up again and
/// multiplied back, so every tick lands on a rounded row value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleModel {
    pub max_value: f64,
    pub row_value: f64,
    pub axis_max: f64,
    pub row_count: usize,
}

impl ScaleModel {
    pub fn from_max(max_value: f64) -> Self {
        let rows = ROW_COUNT as f64;
        let row_value = round_up_10(max_value) / rows;
        let axis_max = round_up_10(row_value) * rows;
        Self { max_value, row_value, axis_max, row_count: ROW_COUNT }
    }

    /// Scale for a series; an empty series scales like all-zero data.
    pub fn from_points(points: &[DataPoint]) -> Self {
        Self::from_max(max_value(points).unwrap_or(0.0))
    }

    /// `value / axis_max`, or 0 when the axis has no extent.
    #[inline]
    pub fn ratio(&self, value: f64) -> f64 {
        if self.axis_max > 0.0 {
            value / self.axis_max
        } else {
            0.0
        }
    }

    /// Label value of tick row `i` (0 = baseline).
    pub fn tick_value(&self, i: usize) -> f64 {
        (self.axis_max / self.row_count as f64 * i as f64).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_series_scales_to_one_hundred() {
        let s = ScaleModel::from_max(87.0);
        assert_eq!(s.row_value, 18.0);
        assert_eq!(s.axis_max, 100.0);
        assert_eq!(s.row_count, 5);
    }

    #[test]
    fn two_passes_differ_from_single_rounding() {
        // single pass would give 110; the row rounding lifts it to 150
        let s = ScaleModel::from_max(104.0);
        assert_eq!(s.row_value, 22.0);
        assert_eq!(s.axis_max, 150.0);
    }

    #[test]
    fn round_up_10_is_stable() {
        for x in [0.0, 0.1, 9.99, 10.0, 10.01, 87.0, 1234.5] {
            let once = round_up_10(x);
            assert_eq!(round_up_10(once), once);
            assert!(once >= x);
        }
    }

    #[test]
    fn zero_axis_has_zero_ratio() {
        let s = ScaleModel::from_max(0.0);
        assert_eq!(s.axis_max, 0.0);
        assert_eq!(s.ratio(5.0), 0.0);
    }

    #[test]
    fn tick_values_are_evenly_spaced() {
        let s = ScaleModel::from_max(87.0);
        let ticks: Vec<f64> = (0..=s.row_count).map(|i| s.tick_value(i)).collect();
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }
}
