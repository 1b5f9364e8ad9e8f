// File: crates/diagram-core/tests/geometry.rs
// Purpose: Numeric layout properties of bar, line and pie charts rendered through the factory.

use diagram_core::bar;
use diagram_core::line;
use diagram_core::scale::round_up_10;
use diagram_core::{normalize, DiagramFactory, Document, ScaleModel, Shape};
use serde_json::{json, Value};

fn config(values: &[f64]) -> Value {
    let data: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| json!({ "value": v, "label": format!("p{i}"), "color": "steelblue" }))
        .collect();
    json!({ "target": "#chart", "data": data })
}

fn doc(width: f64, height: f64) -> Document {
    let mut d = Document::new();
    d.add_surface("chart", width, height);
    d
}

#[test]
fn bar_width_fills_surface() {
    for &width in &[150.0, 400.0, 500.0, 640.0, 1200.0] {
        for n in 1..=8usize {
            let values: Vec<f64> = (1..=n).map(|v| v as f64 * 3.0).collect();
            let model = normalize(&config(&values), &doc(width, 300.0)).unwrap();
            let n = n as f64;
            let total = model.bar_width() * n + model.bar_spacing() * n + 50.0;
            assert!((total - width).abs() < 1e-9, "width {width}, n {n}: {total}");
        }
    }
}

#[test]
fn nice_rounding_is_idempotent() {
    for x in [0.0, 1.0, 9.5, 10.0, 87.0, 104.0, 1234.5] {
        assert_eq!(round_up_10(round_up_10(x)), round_up_10(x));
    }
}

#[test]
fn reference_series_scale_and_bars() {
    let d = doc(500.0, 500.0);
    let model = normalize(&config(&[10.0, 42.0, 87.0, 15.0, 63.0]), &d).unwrap();
    let scale = ScaleModel::from_points(model.points());
    assert_eq!(scale.max_value, 87.0);
    assert_eq!(scale.row_value, 18.0);
    assert_eq!(scale.axis_max, 100.0);

    let bars = bar::layout(&model, &scale);
    assert_eq!(model.bar_width(), 85.0);
    assert_eq!(bars[0].rect.x, 50.0);
    assert_eq!(bars[0].rect.height, 45.0);
    assert_eq!(bars[0].rect.y, 425.0);
    assert_eq!(bars[1].rect.x, 140.0);
    assert_eq!(bars[0].label_at.y, 490.0);
}

#[test]
fn half_of_axis_max_is_half_of_plot_height() {
    let model = normalize(&config(&[50.0, 100.0]), &doc(500.0, 500.0)).unwrap();
    let scale = ScaleModel::from_max(100.0);
    assert_eq!(bar::layout(&model, &scale)[0].rect.height, 225.0);
}

#[test]
fn line_vertices_step_across_the_plot() {
    let model = normalize(&config(&[1.0, 2.0, 3.0, 4.0]), &doc(400.0, 300.0)).unwrap();
    let scale = ScaleModel::from_points(model.points());
    let vertices = line::layout(&model, &scale);
    assert_eq!(vertices[0].x, 75.0);
    assert_eq!(vertices[2].x, 225.0);
}

#[test]
fn line_chart_emits_markers_in_first_color() {
    let mut d = doc(400.0, 300.0);
    let raw = json!({
        "target": "#chart",
        "data": [
            { "value": 4, "label": "a", "color": "red" },
            { "value": 8, "label": "b", "color": "blue" },
        ],
    });
    let chart = DiagramFactory::new(raw).create_line_diagram(&mut d).unwrap();
    let surface = d.resolve("#chart").unwrap();
    assert_eq!(chart.shapes().len(), 2);
    for &id in chart.shapes() {
        let marker = surface.get(id).and_then(Shape::as_circle).unwrap();
        assert_eq!(marker.radius, 4.0);
        assert_eq!(marker.fill.to_hex(), "#ff0000");
    }
    let polylines = surface.iter().filter(|(_, s)| matches!(s, Shape::Polyline(_))).count();
    assert_eq!(polylines, 1);
}

#[test]
fn pie_wedges_cover_the_circle_and_legend_rounds_percentages() {
    let mut d = doc(400.0, 300.0);
    let chart = DiagramFactory::new(config(&[1.0, 1.0, 2.0])).create_circle_diagram(&mut d).unwrap();
    let surface = d.resolve("#chart").unwrap();

    let wedges: Vec<_> = chart.shapes().iter().filter_map(|&id| surface.get(id).and_then(Shape::as_wedge)).collect();
    assert_eq!(wedges.len(), 3);
    assert_eq!(wedges[0].radius, 100.0);
    assert_eq!(wedges[0].start_angle, 0.0);
    assert!((wedges[2].end_angle - std::f64::consts::TAU).abs() < 1e-12);
    assert!(!wedges[2].large_arc());

    let legend: Vec<&str> = surface
        .iter()
        .filter_map(|(_, s)| s.as_text())
        .map(|t| t.content.as_str())
        .filter(|c| c.ends_with('%'))
        .collect();
    assert_eq!(legend, vec!["25%", "25%", "50%"]);
}

#[test]
fn all_zero_pie_draws_equal_slices() {
    let mut d = doc(400.0, 300.0);
    let chart = DiagramFactory::new(config(&[0.0, 0.0])).create_circle_diagram(&mut d).unwrap();
    let surface = d.resolve("#chart").unwrap();
    let first = surface.get(chart.shapes()[0]).and_then(Shape::as_wedge).unwrap();
    assert!((first.sweep() - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn grid_follows_decoration() {
    let count_lines = |show_grid: bool| {
        let mut raw = config(&[5.0, 7.0]);
        raw["decoration"] = json!({ "showGrid": show_grid });
        let mut d = doc(400.0, 300.0);
        DiagramFactory::new(raw).create_bar_diagram(&mut d).unwrap();
        d.resolve("#chart").unwrap().iter().filter(|(_, s)| matches!(s, Shape::Line(_))).count()
    };
    assert_eq!(count_lines(true), 2 + 6);
    assert_eq!(count_lines(false), 2);
}
