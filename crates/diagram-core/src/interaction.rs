// File: crates/diagram-core/src/interaction.rs
// Summary: Per-shape hover state machine (expand-on-hover, delayed tooltip) with snapshot restore.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::chart::ChartKind;
use crate::config::Interactivity;
use crate::geometry::{Point, Rect};
use crate::series::DataPoint;
use crate::surface::{Shape, ShapeId, Surface, Transition};

/// Rectangles grow by this much in width and height, recentred by half of it.
pub const EXPAND_GROWTH: f64 = 10.0;
/// Marker circles grow their radius by this much.
pub const MARKER_GROWTH: f64 = 3.0;
pub const HOVER_TRANSITION: Duration = Duration::from_millis(500);
pub const TOOLTIP_FADE_DELAY: Duration = Duration::from_secs(1);
pub const TOOLTIP_OFFSET: f64 = 10.0;
pub const TOOLTIP_HIDDEN_SCALE: f64 = 0.95;

/// Geometry captured at registration; the only basis for restoring a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    Circle { center: Point, radius: f64 },
    /// Wedges never change shape on hover.
    Fixed,
}

impl Geometry {
    fn capture(shape: &Shape) -> Self {
        match shape {
            Shape::Rect(r) => Geometry::Rect(r.rect),
            Shape::Circle(c) => Geometry::Circle { center: c.center, radius: c.radius },
            _ => Geometry::Fixed,
        }
    }

    fn write(&self, shape: &mut Shape) {
        match (self, shape) {
            (Geometry::Rect(rect), Shape::Rect(r)) => r.rect = *rect,
            (Geometry::Circle { center, radius }, Shape::Circle(c)) => {
                c.center = *center;
                c.radius = *radius;
            }
            _ => {}
        }
    }

    fn expanded(&self) -> Self {
        match *self {
            Geometry::Rect(rect) => Geometry::Rect(rect.inflate(EXPAND_GROWTH / 2.0)),
            Geometry::Circle { center, radius } => Geometry::Circle { center, radius: radius + MARKER_GROWTH },
            Geometry::Fixed => Geometry::Fixed,
        }
    }

    fn transition(&self) -> Option<Transition> {
        let properties = match self {
            Geometry::Rect(_) => "width height x y",
            Geometry::Circle { .. } => "r",
            Geometry::Fixed => return None,
        };
        Some(Transition { properties, duration: HOVER_TRANSITION })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

#[derive(Clone, Debug)]
struct Registration {
    point: DataPoint,
    kind: ChartKind,
    settings: Interactivity,
    snapshot: Geometry,
    state: HoverState,
}

impl Registration {
    fn expands(&self) -> bool {
        self.settings.expand && self.kind.supports_expand()
    }
}

/// Floating label box shown while a shape is hovered.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipBox {
    pub title: String,
    pub value: String,
    pub visible: bool,
    pub opacity: f64,
    pub scale: f64,
    pub position: Point,
    fade_in_due: Option<Duration>,
}

impl TooltipBox {
    fn hidden() -> Self {
        Self {
            title: String::new(),
            value: String::new(),
            visible: false,
            opacity: 0.0,
            scale: TOOLTIP_HIDDEN_SCALE,
            position: Point::default(),
            fade_in_due: None,
        }
    }

    fn follow(&mut self, pointer: Point) {
        self.position = pointer.offset(TOOLTIP_OFFSET, TOOLTIP_OFFSET);
    }

    fn show(&mut self, point: &DataPoint, pointer: Point, now: Duration) {
        self.title = point.label.clone();
        self.value = point.display_value();
        self.visible = true;
        self.follow(pointer);
        self.fade_in_due = Some(now + TOOLTIP_FADE_DELAY);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.opacity = 0.0;
        self.scale = TOOLTIP_HIDDEN_SCALE;
        self.fade_in_due = None;
    }
}

/// Hover behaviors for every interactive shape of one chart.
#[derive(Debug, Default)]
pub struct InteractionController {
    registrations: BTreeMap<ShapeId, Registration>,
    tooltip: Option<TooltipBox>,
}

impl InteractionController {
    pub fn new() -> Self { Self::default() }

    /// Take the shape's geometry snapshot and start tracking it in `Idle`.
    /// A shape is registered at most once; later calls are ignored.
    pub fn register(
        &mut self,
        surface: &Surface,
        shape: ShapeId,
        point: DataPoint,
        kind: ChartKind,
        settings: Interactivity,
    ) {
        let Some(current) = surface.get(shape) else {
            tracing::warn!(shape = shape.index(), "cannot register a shape missing from the surface");
            return;
        };
        if self.registrations.contains_key(&shape) {
            return;
        }
        let snapshot = Geometry::capture(current);
        self.registrations.insert(shape, Registration { point, kind, settings, snapshot, state: HoverState::Idle });
    }

    pub fn pointer_enter(&mut self, surface: &mut Surface, shape: ShapeId, at: Point, now: Duration) {
        let Some(reg) = self.registrations.get_mut(&shape) else { return };
        if reg.state == HoverState::Hovered {
            return;
        }
        reg.state = HoverState::Hovered;
        tracing::trace!(shape = shape.index(), label = %reg.point.label, "hover enter");

        if reg.expands() {
            if let Some(target) = surface.get_mut(shape) {
                let grown = reg.snapshot.expanded();
                grown.write(target);
                set_transition(target, reg.snapshot.transition());
            }
        }
        if reg.settings.tooltip_on_hover {
            self.tooltip.get_or_insert_with(TooltipBox::hidden).show(&reg.point, at, now);
        }
    }

    pub fn pointer_move(&mut self, shape: ShapeId, at: Point) {
        let hovered = self
            .registrations
            .get(&shape)
            .is_some_and(|r| r.state == HoverState::Hovered && r.settings.tooltip_on_hover);
        if let (true, Some(tooltip)) = (hovered, self.tooltip.as_mut()) {
            tooltip.follow(at);
        }
    }

    pub fn pointer_leave(&mut self, surface: &mut Surface, shape: ShapeId) {
        let Some(reg) = self.registrations.get_mut(&shape) else { return };
        if reg.state == HoverState::Idle {
            return;
        }
        reg.state = HoverState::Idle;
        tracing::trace!(shape = shape.index(), "hover leave");

        if reg.expands() {
            if let Some(target) = surface.get_mut(shape) {
                reg.snapshot.write(target);
            }
        }
        if reg.settings.tooltip_on_hover {
            if let Some(tooltip) = self.tooltip.as_mut() {
                tooltip.hide();
            }
        }
    }

    /// Fire the tooltip fade-in once its delay has elapsed.
    pub fn poll(&mut self, now: Duration) {
        let Some(tooltip) = self.tooltip.as_mut() else { return };
        if tooltip.fade_in_due.is_some_and(|due| due <= now) {
            tooltip.fade_in_due = None;
            tooltip.opacity = 1.0;
            tooltip.scale = 1.0;
            tracing::trace!(title = %tooltip.title, "tooltip faded in");
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        self.tooltip.as_ref().is_some_and(|t| t.fade_in_due.is_some())
    }

    pub fn is_registered(&self, shape: ShapeId) -> bool {
        self.registrations.contains_key(&shape)
    }

    pub fn state(&self, shape: ShapeId) -> Option<HoverState> {
        self.registrations.get(&shape).map(|r| r.state)
    }

    pub fn snapshot(&self, shape: ShapeId) -> Option<Geometry> {
        self.registrations.get(&shape).map(|r| r.snapshot)
    }

    /// The shared tooltip, once any shape has shown it.
    pub fn tooltip(&self) -> Option<&TooltipBox> {
        self.tooltip.as_ref()
    }

    pub fn len(&self) -> usize { self.registrations.len() }
    pub fn is_empty(&self) -> bool { self.registrations.is_empty() }
}

fn set_transition(shape: &mut Shape, transition: Option<Transition>) {
    match shape {
        Shape::Rect(r) => r.transition = transition,
        Shape::Circle(c) => c.transition = transition,
        _ => {}
    }
}
