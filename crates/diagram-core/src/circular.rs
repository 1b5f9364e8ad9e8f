// File: crates/diagram-core/src/circular.rs
// Summary: Pie chart geometry (wedges swept clockwise from 0) and the stacked legend.

use crate::chart::{Behaviors, ChartBase, ChartKind, GeometryHints};
use crate::geometry::{deg_to_rad, Point, Rect};
use crate::series::{sum_values, DataPoint};
use crate::surface::{RectShape, Shape, ShapeId, Surface, TextShape, WedgeShape};
use crate::theme::Theme;
use crate::types::{TextAnchor, AXIS_PADDING};

const FULL_TURN_DEG: f64 = 360.0;

const LEGEND_X: f64 = 10.0;
const LEGEND_TOP: f64 = 10.0;
const LEGEND_ROW: f64 = 15.0;
const SWATCH: f64 = 10.0;
const LEGEND_TEXT_DROP: f64 = 8.0;

/// Share of one point in the whole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    /// Fraction of the sum, 0..1.
    pub percent: f64,
    /// Swept angle in degrees.
    pub angle: f64,
    /// Start and end of the sweep in radians.
    pub start: f64,
    pub end: f64,
}

impl Slice {
    /// Legend text: whole percent with a `%` suffix.
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.percent * 100.0).round())
    }
}

/// Slices in data order with cumulative sweep.
///
/// A zero sum has no proportions; every point then gets an equal share.
pub fn slices(points: &[DataPoint]) -> Vec<Slice> {
    let sum = sum_values(points);
    let n = points.len() as f64;
    let equal_share = sum == 0.0;
    if equal_share {
        tracing::warn!(points = points.len(), "pie values sum to zero; drawing equal slices");
    }

    let mut start = 0.0;
    points
        .iter()
        .map(|p| {
            let percent = if equal_share { 1.0 / n } else { p.value / sum };
            let angle = FULL_TURN_DEG * percent;
            let end = start + deg_to_rad(angle);
            let slice = Slice { percent, angle, start, end };
            start = end;
            slice
        })
        .collect()
}

pub fn render(base: &ChartBase, theme: &Theme, surface: &mut Surface, behaviors: &mut Behaviors) -> Vec<ShapeId> {
    let model = base.model();
    let (width, height) = (base.surface_width(), base.surface_height());
    let center = Point::new(width / 2.0, height / 2.0);
    let radius = width.min(height) / 2.0 - AXIS_PADDING;
    let slices = slices(model.points());

    let wedges = slices
        .iter()
        .zip(model.points())
        .map(|(slice, point)| {
            let id = surface.append(Shape::Wedge(WedgeShape {
                center,
                radius,
                start_angle: slice.start,
                end_angle: slice.end,
                fill: point.color,
            }));
            base.attach_behaviors(surface, id, point, GeometryHints::None, ChartKind::Circular, behaviors);
            id
        })
        .collect();

    draw_legend(&slices, model.points(), model.font_size().x_axis, theme, surface);
    wedges
}

fn draw_legend(slices: &[Slice], points: &[DataPoint], font_size: f64, theme: &Theme, surface: &mut Surface) {
    let mut y = LEGEND_TOP;
    for (slice, point) in slices.iter().zip(points) {
        surface.append(Shape::Rect(RectShape {
            rect: Rect::from_xywh(LEGEND_X, y, SWATCH, SWATCH),
            fill: point.color,
            transition: None,
        }));
        surface.append(Shape::Text(TextShape {
            position: Point::new(LEGEND_X * 3.0, y + LEGEND_TEXT_DROP),
            content: slice.percent_label(),
            font_size,
            anchor: TextAnchor::Start,
            fill: theme.label,
        }));
        surface.append(Shape::Text(TextShape {
            position: Point::new(LEGEND_X * 6.0, y + LEGEND_TEXT_DROP),
            content: point.label.clone(),
            font_size,
            anchor: TextAnchor::Start,
            fill: theme.label,
        }));
        y += LEGEND_ROW;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::f64::consts::PI;

    fn pts(values: &[f64]) -> Vec<DataPoint> {
        values.iter().map(|&v| DataPoint { value: v, label: "p".into(), color: Color::BLACK }).collect()
    }

    #[test]
    fn quarter_quarter_half() {
        let s = slices(&pts(&[1.0, 1.0, 2.0]));
        let angles: Vec<f64> = s.iter().map(|s| s.angle).collect();
        assert_eq!(angles, vec![90.0, 90.0, 180.0]);
        assert!((s[2].end - 2.0 * PI).abs() < 1e-12);
        let labels: Vec<String> = s.iter().map(Slice::percent_label).collect();
        assert_eq!(labels, vec!["25%", "25%", "50%"]);
    }

    #[test]
    fn sweep_is_contiguous() {
        let s = slices(&pts(&[3.0, 5.0, 7.0, 11.0]));
        assert_eq!(s[0].start, 0.0);
        for w in s.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
    }

    #[test]
    fn zero_sum_falls_back_to_equal_slices() {
        let s = slices(&pts(&[0.0, 0.0, 0.0, 0.0]));
        assert!(s.iter().all(|s| s.angle == 90.0));
        assert!(s.iter().all(|s| s.percent_label() == "25%"));
    }
}
