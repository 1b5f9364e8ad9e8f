// File: crates/diagram-core/src/surface.rs
// Summary: Retained drawing surface (shape primitives addressed by ShapeId) and the host document.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::color::Color;
use crate::geometry::{normalize_angle, polar, Point, Rect};
use crate::types::TextAnchor;

/// Handle to a shape appended to a [`Surface`]. Stable for the surface's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize { self.0 }
}

/// Smooth attribute transition attached to a shape (CSS `transition` semantics).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Space separated attribute names, e.g. `"width height x y"`.
    pub properties: &'static str,
    pub duration: Duration,
}

impl Transition {
    /// The `transition` style value, e.g. `width 0.5s ease, height 0.5s ease`.
    pub fn to_css(&self) -> String {
        let secs = self.duration.as_secs_f64();
        self.properties
            .split_whitespace()
            .map(|p| format!("{p} {secs}s ease"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectShape {
    pub rect: Rect,
    pub fill: Color,
    pub transition: Option<Transition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub from: Point,
    pub to: Point,
    pub stroke: Color,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub transition: Option<Transition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolylineShape {
    pub points: Vec<Point>,
    pub stroke: Color,
    pub stroke_width: f64,
}

/// Closed pie slice: center → arc start → clockwise arc → center.
/// Angles are radians, clockwise from the positive x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct WedgeShape {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Color,
}

impl WedgeShape {
    pub fn sweep(&self) -> f64 { self.end_angle - self.start_angle }

    /// SVG large-arc flag: set when the slice spans more than half the circle.
    pub fn large_arc(&self) -> bool { self.sweep() > std::f64::consts::PI }

    pub fn arc_start(&self) -> Point { polar(self.center, self.radius, self.start_angle) }
    pub fn arc_end(&self) -> Point { polar(self.center, self.radius, self.end_angle) }

    /// SVG path data: `M cx cy L x1 y1 A r r 0 large 1 x2 y2 Z`.
    pub fn path_data(&self) -> String {
        let s = self.arc_start();
        let e = self.arc_end();
        format!(
            "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
            self.center.x,
            self.center.y,
            s.x,
            s.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc()),
            e.x,
            e.y
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        if dx * dx + dy * dy > self.radius * self.radius {
            return false;
        }
        let sweep = self.sweep();
        if sweep >= 2.0 * std::f64::consts::PI {
            return true;
        }
        let rel = normalize_angle(dy.atan2(dx) - self.start_angle);
        rel <= sweep
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub fill: Color,
}

/// Vector primitive stored on a surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect(RectShape),
    Line(LineShape),
    Circle(CircleShape),
    Polyline(PolylineShape),
    Wedge(WedgeShape),
    Text(TextShape),
}

impl Shape {
    /// Filled shapes respond to the pointer; strokes and text do not.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Rect(r) => r.rect.contains(p),
            Shape::Circle(c) => {
                let dx = p.x - c.center.x;
                let dy = p.y - c.center.y;
                dx * dx + dy * dy <= c.radius * c.radius
            }
            Shape::Wedge(w) => w.contains(p),
            Shape::Line(_) | Shape::Polyline(_) | Shape::Text(_) => false,
        }
    }

    pub fn as_rect(&self) -> Option<&RectShape> {
        match self { Shape::Rect(r) => Some(r), _ => None }
    }
    pub fn as_circle(&self) -> Option<&CircleShape> {
        match self { Shape::Circle(c) => Some(c), _ => None }
    }
    pub fn as_wedge(&self) -> Option<&WedgeShape> {
        match self { Shape::Wedge(w) => Some(w), _ => None }
    }
    pub fn as_text(&self) -> Option<&TextShape> {
        match self { Shape::Text(t) => Some(t), _ => None }
    }
}

/// Fixed-size drawing surface holding shapes in paint order.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, shapes: Vec::new() }
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn len(&self) -> usize { self.shapes.len() }
    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Append a shape on top of everything drawn so far.
    pub fn append(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }

    /// Topmost shape under `p` accepted by `filter`.
    pub fn hit_test_where(&self, p: Point, mut filter: impl FnMut(ShapeId) -> bool) -> Option<ShapeId> {
        self.iter()
            .rev()
            .find(|(id, s)| s.contains(p) && filter(*id))
            .map(|(id, _)| id)
    }

    pub fn hit_test(&self, p: Point) -> Option<ShapeId> {
        self.hit_test_where(p, |_| true)
    }
}

/// Host document: resolves `#id` references to drawing surfaces.
#[derive(Clone, Debug, Default)]
pub struct Document {
    surfaces: BTreeMap<String, Surface>,
}

impl Document {
    pub fn new() -> Self { Self::default() }

    /// Create (or replace) the surface named `id` and return it.
    pub fn add_surface(&mut self, id: impl Into<String>, width: f64, height: f64) -> &mut Surface {
        let slot = self.surfaces.entry(id.into()).or_default();
        *slot = Surface::new(width, height);
        slot
    }

    /// `#bar` resolves to the surface registered as `bar`.
    pub fn resolve(&self, target: &str) -> Option<&Surface> {
        self.surfaces.get(target.strip_prefix('#')?)
    }

    pub fn resolve_mut(&mut self, target: &str) -> Option<&mut Surface> {
        self.surfaces.get_mut(target.strip_prefix('#')?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn wedge(start: f64, end: f64) -> WedgeShape {
        WedgeShape { center: Point::new(100.0, 100.0), radius: 50.0, start_angle: start, end_angle: end, fill: Color::BLACK }
    }

    #[test]
    fn append_returns_sequential_ids() {
        let mut s = Surface::new(100.0, 100.0);
        let a = s.append(Shape::Line(LineShape { from: Point::new(0.0, 0.0), to: Point::new(1.0, 1.0), stroke: Color::BLACK, stroke_width: 1.0 }));
        let b = s.append(Shape::Line(LineShape { from: Point::new(0.0, 0.0), to: Point::new(2.0, 2.0), stroke: Color::BLACK, stroke_width: 1.0 }));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut s = Surface::new(100.0, 100.0);
        let below = s.append(Shape::Rect(RectShape { rect: Rect::from_xywh(0.0, 0.0, 50.0, 50.0), fill: Color::BLACK, transition: None }));
        let above = s.append(Shape::Circle(CircleShape { center: Point::new(25.0, 25.0), radius: 5.0, fill: Color::WHITE, transition: None }));
        assert_eq!(s.hit_test(Point::new(25.0, 25.0)), Some(above));
        assert_eq!(s.hit_test(Point::new(2.0, 2.0)), Some(below));
        assert_eq!(s.hit_test_where(Point::new(25.0, 25.0), |id| id != above), Some(below));
        assert_eq!(s.hit_test(Point::new(90.0, 90.0)), None);
    }

    #[test]
    fn iter_walks_paint_order_from_either_end() {
        let mut s = Surface::new(10.0, 10.0);
        let ids: Vec<ShapeId> = (0..3)
            .map(|i| s.append(Shape::Circle(CircleShape { center: Point::new(i as f64, 0.0), radius: 1.0, fill: Color::BLACK, transition: None })))
            .collect();
        let forward: Vec<ShapeId> = s.iter().map(|(id, _)| id).collect();
        let backward: Vec<ShapeId> = s.iter().rev().map(|(id, _)| id).collect();
        assert_eq!(forward, ids);
        assert_eq!(backward, ids.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn wedge_contains_by_angle_and_radius() {
        let w = wedge(0.0, PI / 2.0);
        assert!(w.contains(Point::new(120.0, 120.0)));
        assert!(!w.contains(Point::new(80.0, 120.0)));
        assert!(!w.contains(Point::new(160.0, 160.0)));
    }

    #[test]
    fn wedge_path_uses_large_arc_past_half_turn() {
        assert!(!wedge(0.0, PI).large_arc());
        assert!(wedge(0.0, PI + 0.1).large_arc());
        let d = wedge(0.0, PI / 2.0).path_data();
        assert!(d.starts_with("M 100 100 L 150 100 A 50 50 0 0 1"));
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn document_resolves_hash_references() {
        let mut doc = Document::new();
        doc.add_surface("bar", 400.0, 300.0);
        assert!(doc.resolve("#bar").is_some());
        assert!(doc.resolve("bar").is_none());
        assert!(doc.resolve("#missing").is_none());
        assert_eq!(doc.resolve("#bar").map(Surface::width), Some(400.0));
    }

    #[test]
    fn transition_css_lists_each_property() {
        let t = Transition { properties: "width height", duration: Duration::from_millis(500) };
        assert_eq!(t.to_css(), "width 0.5s ease, height 0.5s ease");
    }
}
