// File: crates/diagram-core/src/series.rs
// Summary: Data point model shared by every chart kind.

use crate::color::Color;

/// One labelled, colored value. Order within a series defines left-to-right
/// placement for cartesian charts and sweep order for pie charts.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub value: f64,
    pub label: String,
    pub color: Color,
}

impl DataPoint {
    /// Value as shown in tooltips: integers without a fractional part.
    pub fn display_value(&self) -> String {
        format_number(self.value)
    }
}

/// Largest value in the series, or `None` when empty.
pub fn max_value(points: &[DataPoint]) -> Option<f64> {
    points.iter().map(|p| p.value).reduce(f64::max)
}

pub fn sum_values(points: &[DataPoint]) -> f64 {
    points.iter().map(|p| p.value).sum()
}

pub(crate) fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f64) -> DataPoint {
        DataPoint { value: v, label: "x".into(), color: Color::BLACK }
    }

    #[test]
    fn max_and_sum() {
        let pts = [p(10.0), p(42.0), p(87.0), p(15.0), p(63.0)];
        assert_eq!(max_value(&pts), Some(87.0));
        assert_eq!(sum_values(&pts), 217.0);
        assert_eq!(max_value(&[]), None);
    }

    #[test]
    fn display_value_drops_integer_fraction() {
        assert_eq!(p(42.0).display_value(), "42");
        assert_eq!(p(4.5).display_value(), "4.5");
        assert_eq!(p(-3.0).display_value(), "-3");
    }
}
