// File: crates/diagram-core/src/bar.rs
// Summary: Bar chart geometry; one rectangle and one category label per point.

use crate::chart::{Behaviors, ChartBase, ChartKind, GeometryHints};
use crate::config::ChartModel;
use crate::geometry::{Point, Rect};
use crate::scale::ScaleModel;
use crate::surface::{RectShape, Shape, ShapeId, Surface, TextShape};
use crate::theme::Theme;
use crate::types::{TextAnchor, AXIS_PADDING, BASELINE_OFFSET, LABEL_OFFSET};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub rect: Rect,
    pub label_at: Point,
}

/// Bars grow up from `height - 30`; bar `i` starts at `i * (width + spacing) + 50`.
pub fn layout(model: &ChartModel, scale: &ScaleModel) -> Vec<BarGeometry> {
    let height = model.surface().height;
    let bar_width = model.bar_width();
    let step = bar_width + model.bar_spacing();

    model
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let bar_height = scale.ratio(p.value) * (height - AXIS_PADDING);
            let x = i as f64 * step + AXIS_PADDING;
            let y = height - bar_height - BASELINE_OFFSET;
            BarGeometry {
                rect: Rect::from_xywh(x, y, bar_width, bar_height),
                label_at: Point::new(x + bar_width / 2.0, height - LABEL_OFFSET),
            }
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
    let font_size = model.font_size().x_axis;

    layout(model, scale)
        .into_iter()
        .zip(model.points())
        .map(|(geo, point)| {
            let id = surface.append(Shape::Rect(RectShape { rect: geo.rect, fill: point.color, transition: None }));
            base.attach_behaviors(
                surface,
                id,
                point,
                GeometryHints::Bar { final_height: geo.rect.height, final_y: geo.rect.y },
                ChartKind::Bar,
                behaviors,
            );
            surface.append(Shape::Text(TextShape {
                position: geo.label_at,
                content: point.label.clone(),
                font_size,
                anchor: TextAnchor::Middle,
                fill: theme.label,
            }));
            id
        })
        .collect()
}
