// File: crates/diagram-core/src/line.rs
// Summary: Line chart geometry; a single polyline, then a marker and label per point.

use crate::chart::{Behaviors, ChartBase, ChartKind, GeometryHints};
use crate::config::ChartModel;
use crate::geometry::Point;
use crate::scale::ScaleModel;
use crate::surface::{CircleShape, PolylineShape, Shape, ShapeId, Surface, TextShape};
use crate::theme::Theme;
use crate::types::{TextAnchor, AXIS_PADDING, BASELINE_OFFSET, LABEL_OFFSET, LINE_STROKE_WIDTH, MARKER_RADIUS};

/// Horizontal margin split as 75 on the left and 25 on the right.
const X_MARGIN: f64 = 100.0;
const X_OFFSET: f64 = 75.0;

/// Vertex positions: `x = i/n * (w - 100) + 75`, `y = h - v/axis_max * (h - 50) - 30`.
pub fn layout(model: &ChartModel, scale: &ScaleModel) -> Vec<Point> {
    let (width, height) = (model.surface().width, model.surface().height);
    let n = model.points().len() as f64;

    model
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64 / n * (width - X_MARGIN) + X_OFFSET;
            let y = height - scale.ratio(p.value) * (height - AXIS_PADDING) - BASELINE_OFFSET;
            Point::new(x, y)
        })
        .collect()
}

pub fn render(
    base: &ChartBase,
    scale: &ScaleModel,
    theme: &Theme,
    surface: &mut Surface,
    behaviors: &mut Behaviors,
) -> Vec<ShapeId> {
    let model = base.model();
    let vertices = layout(model, scale);
    // the whole line, markers included, takes the first point's color
    let color = model.points()[0].color;
    let height = model.surface().height;
    let font_size = model.font_size().x_axis;

    surface.append(Shape::Polyline(PolylineShape {
        points: vertices.clone(),
        stroke: color,
        stroke_width: LINE_STROKE_WIDTH,
    }));

    vertices
        .into_iter()
        .zip(model.points())
        .map(|(at, point)| {
            surface.append(Shape::Text(TextShape {
                position: Point::new(at.x, height - LABEL_OFFSET),
                content: point.label.clone(),
                font_size,
                anchor: TextAnchor::Middle,
                fill: theme.label,
            }));
            let id = surface.append(Shape::Circle(CircleShape {
                center: at,
                radius: MARKER_RADIUS,
                fill: color,
                transition: None,
            }));
            base.attach_behaviors(surface, id, point, GeometryHints::Marker { final_y: at.y }, ChartKind::Line, behaviors);
            id
        })
        .collect()
}
