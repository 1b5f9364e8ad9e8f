// File: crates/diagram-core/src/events.rs
// Summary: Pointer events delivered by the host and a tracker that derives them from raw positions.

use crate::geometry::Point;
use crate::surface::{ShapeId, Surface};

/// Pointer input routed to a single shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter { shape: ShapeId, at: Point },
    Move { shape: ShapeId, at: Point },
    Leave { shape: ShapeId },
}

impl PointerEvent {
    pub fn shape(&self) -> ShapeId {
        match *self {
            PointerEvent::Enter { shape, .. } | PointerEvent::Move { shape, .. } | PointerEvent::Leave { shape } => shape,
        }
    }
}

/// Remembers which shape the pointer is over so raw positions become
/// enter/move/leave transitions.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    hovered: Option<ShapeId>,
}

impl PointerTracker {
    pub fn hovered(&self) -> Option<ShapeId> { self.hovered }

    /// Hit-test `at` against shapes accepted by `accept` (topmost wins).
    /// Leaving one shape is always reported before entering the next.
    pub fn pointer_moved(&mut self, surface: &Surface, at: Point, accept: impl Fn(ShapeId) -> bool) -> Vec<PointerEvent> {
        let hit = surface.hit_test_where(at, accept);
        match (self.hovered, hit) {
            (Some(prev), Some(next)) if prev == next => vec![PointerEvent::Move { shape: next, at }],
            (prev, next) => {
                self.hovered = next;
                prev.map(|shape| PointerEvent::Leave { shape })
                    .into_iter()
                    .chain(next.map(|shape| PointerEvent::Enter { shape, at }))
                    .collect()
            }
        }
    }

    /// The pointer left the surface.
    pub fn pointer_left(&mut self) -> Option<PointerEvent> {
        self.hovered.take().map(|shape| PointerEvent::Leave { shape })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Rect;
    use crate::surface::{RectShape, Shape};

    fn two_bars() -> (Surface, ShapeId, ShapeId) {
        let mut s = Surface::new(200.0, 100.0);
        let mut rect = |x| {
            s.append(Shape::Rect(RectShape { rect: Rect::from_xywh(x, 0.0, 40.0, 100.0), fill: Color::BLACK, transition: None }))
        };
        let a = rect(0.0);
        let b = rect(100.0);
        (s, a, b)
    }

    #[test]
    fn enter_move_leave_sequence() {
        let (s, a, b) = two_bars();
        let mut t = PointerTracker::default();

        let e = t.pointer_moved(&s, Point::new(10.0, 10.0), |_| true);
        assert_eq!(e, vec![PointerEvent::Enter { shape: a, at: Point::new(10.0, 10.0) }]);

        let e = t.pointer_moved(&s, Point::new(12.0, 10.0), |_| true);
        assert_eq!(e, vec![PointerEvent::Move { shape: a, at: Point::new(12.0, 10.0) }]);

        let e = t.pointer_moved(&s, Point::new(110.0, 10.0), |_| true);
        assert_eq!(e.len(), 2);
        assert_eq!(e[0], PointerEvent::Leave { shape: a });
        assert_eq!(e[1].shape(), b);

        assert_eq!(t.pointer_left(), Some(PointerEvent::Leave { shape: b }));
        assert_eq!(t.pointer_left(), None);
    }

    #[test]
    fn rejected_shapes_are_transparent() {
        let (s, a, _) = two_bars();
        let mut t = PointerTracker::default();
        assert!(t.pointer_moved(&s, Point::new(10.0, 10.0), |id| id != a).is_empty());
        assert_eq!(t.hovered(), None);
    }
}
