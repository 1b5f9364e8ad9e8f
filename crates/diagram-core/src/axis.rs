// File: crates/diagram-core/src/axis.rs
// Summary: Cartesian axes layout and drawing (axis lines, gridlines, tick labels).

use crate::chart::ChartBase;
use crate::geometry::Point;
use crate::grid::tick_rows;
use crate::scale::ScaleModel;
use crate::series::format_number;
use crate::surface::{LineShape, Shape, ShapeId, Surface, TextShape};
use crate::theme::Theme;
use crate::types::{TextAnchor, AXIS_PADDING};

/// Axes sit 10 units left of the padding line and 20 below the baseline row.
const AXIS_INSET: f64 = 10.0;
const BASELINE_DROP: f64 = 20.0;
const TICK_LABEL_GAP: f64 = 15.0;
const TICK_LABEL_DROP: f64 = 25.0;

/// One horizontal value row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label_at: Point,
    pub grid_from: Point,
    pub grid_to: Point,
}

/// Pure layout of both axes and the tick rows for a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianAxes {
    pub x_axis: (Point, Point),
    pub y_axis: (Point, Point),
    pub ticks: Vec<Tick>,
}

impl CartesianAxes {
    pub fn layout(width: f64, height: f64, scale: &ScaleModel) -> Self {
        let origin_x = AXIS_PADDING - AXIS_INSET;
        let baseline_y = height - AXIS_PADDING + BASELINE_DROP;

        let ticks = tick_rows(height)
            .into_iter()
            .enumerate()
            .map(|(i, y)| Tick {
                value: scale.tick_value(i),
                label_at: Point::new(AXIS_PADDING - TICK_LABEL_GAP, y + TICK_LABEL_DROP),
                grid_from: Point::new(origin_x, y + BASELINE_DROP),
                grid_to: Point::new(width, y + BASELINE_DROP),
            })
            .collect();

        Self {
            x_axis: (Point::new(origin_x, baseline_y), Point::new(width, baseline_y)),
            y_axis: (Point::new(origin_x, AXIS_PADDING - 30.0), Point::new(origin_x, baseline_y)),
            ticks,
        }
    }
}

/// Draw axes and tick rows for `base`. Gridlines follow `decoration.show_grid`;
/// tick labels are always drawn.
pub fn draw(base: &ChartBase, scale: &ScaleModel, theme: &Theme, surface: &mut Surface) -> Vec<ShapeId> {
    let model = base.model();
    let axes = CartesianAxes::layout(base.surface_width(), base.surface_height(), scale);
    let show_grid = model.decoration().show_grid;
    let font_size = model.font_size().y_axis;

    let axis_line = |(from, to): (Point, Point)| {
        Shape::Line(LineShape { from, to, stroke: theme.axis_line, stroke_width: 1.0 })
    };

    let mut ids = vec![surface.append(axis_line(axes.x_axis)), surface.append(axis_line(axes.y_axis))];
    for tick in &axes.ticks {
        ids.push(surface.append(Shape::Text(TextShape {
            position: tick.label_at,
            content: format_number(tick.value),
            font_size,
            anchor: TextAnchor::End,
            fill: theme.axis_label,
        })));
        if show_grid {
            ids.push(surface.append(Shape::Line(LineShape {
                from: tick.grid_from,
                to: tick.grid_to,
                stroke: theme.grid,
                stroke_width: 1.0,
            })));
        }
    }
    tracing::trace!(axis_max = scale.axis_max, show_grid, shapes = ids.len(), "drew cartesian axes");
    ids
}
