// File: crates/diagram-core/src/chart.rs
// Summary: Chart kinds, the shared chart base (attach hook), render dispatch and the rendered chart handle.

use std::time::Duration;

use crate::animation::{AnimationController, CancelToken};
use crate::config::ChartModel;
use crate::error::{DiagramError, DiagramResult};
use crate::events::{PointerEvent, PointerTracker};
use crate::geometry::Point;
use crate::interaction::InteractionController;
use crate::scale::ScaleModel;
use crate::series::DataPoint;
use crate::surface::{ShapeId, Surface};
use crate::theme::Theme;
use crate::{axis, bar, circular, line};

/// The three supported chart shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Circular,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Circular => "circular",
        }
    }

    /// Pie wedges never grow on hover; they may still show tooltips.
    pub fn supports_expand(self) -> bool {
        !matches!(self, ChartKind::Circular)
    }

    /// Bar and line charts share the cartesian axes.
    pub fn is_cartesian(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Line)
    }
}

/// Target geometry handed to the animation controller for one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryHints {
    None,
    Bar { final_height: f64, final_y: f64 },
    Marker { final_y: f64 },
}

/// Interaction and animation controllers owned by one rendered chart.
#[derive(Debug, Default)]
pub struct Behaviors {
    pub interactions: InteractionController,
    pub animations: AnimationController,
}

/// Render contract. Concrete charts override [`Diagram::render`]; the shared
/// base keeps the default and refuses to draw.
pub trait Diagram {
    fn render(&self, _surface: &mut Surface, _theme: &Theme) -> DiagramResult<RenderedChart> {
        Err(DiagramError::NotImplemented("render"))
    }
}

/// Shared accessors and the behavior attach hook.
#[derive(Clone, Debug)]
pub struct ChartBase {
    model: ChartModel,
}

impl Diagram for ChartBase {}

impl ChartBase {
    pub fn new(model: ChartModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ChartModel { &self.model }
    pub fn surface_width(&self) -> f64 { self.model.surface().width }
    pub fn surface_height(&self) -> f64 { self.model.surface().height }

    /// Wire interactivity and animation onto a freshly appended shape.
    ///
    /// Interactivity registers first so its snapshot holds the final geometry;
    /// the animation then rewinds the shape to its start state.
    pub fn attach_behaviors(
        &self,
        surface: &mut Surface,
        shape: ShapeId,
        point: &DataPoint,
        hints: GeometryHints,
        kind: ChartKind,
        behaviors: &mut Behaviors,
    ) {
        if let Some(settings) = self.model.interactivity() {
            behaviors.interactions.register(surface, shape, point.clone(), kind, settings);
        }
        if let Some(animation) = self.model.animation() {
            behaviors.animations.register(surface, shape, hints, animation.speed);
        }
    }
}

/// A concrete chart: a kind plus the shared base.
#[derive(Clone, Debug)]
pub struct Chart {
    kind: ChartKind,
    base: ChartBase,
}

impl Chart {
    pub fn new(kind: ChartKind, model: ChartModel) -> Self {
        Self { kind, base: ChartBase::new(model) }
    }

    pub fn kind(&self) -> ChartKind { self.kind }
}

impl Diagram for Chart {
    #[tracing::instrument(skip_all, fields(kind = self.kind.name(), target = %self.base.model().surface().target))]
    fn render(&self, surface: &mut Surface, theme: &Theme) -> DiagramResult<RenderedChart> {
        let mut behaviors = Behaviors::default();
        let before = surface.len();

        let scale = self.kind.is_cartesian().then(|| {
            let scale = ScaleModel::from_points(self.base.model().points());
            axis::draw(&self.base, &scale, theme, surface);
            scale
        });
        let shapes = match (self.kind, scale) {
            (ChartKind::Bar, Some(scale)) => bar::render(&self.base, &scale, theme, surface, &mut behaviors),
            (ChartKind::Line, Some(scale)) => line::render(&self.base, &scale, theme, surface, &mut behaviors),
            _ => circular::render(&self.base, theme, surface, &mut behaviors),
        };

        tracing::debug!(
            appended = surface.len() - before,
            data_shapes = shapes.len(),
            interactive = behaviors.interactions.len(),
            animated = behaviors.animations.len(),
            "rendered chart"
        );

        Ok(RenderedChart {
            kind: self.kind,
            model: self.base.model().clone(),
            shapes,
            behaviors,
            tracker: PointerTracker::default(),
        })
    }
}

/// Result of a successful render: the data shapes and their live behaviors.
///
/// The surface itself stays owned by the host document; every method that
/// mutates shapes borrows it for the duration of the call.
#[derive(Debug)]
pub struct RenderedChart {
    kind: ChartKind,
    model: ChartModel,
    shapes: Vec<ShapeId>,
    behaviors: Behaviors,
    tracker: PointerTracker,
}

impl RenderedChart {
    pub fn kind(&self) -> ChartKind { self.kind }
    pub fn model(&self) -> &ChartModel { &self.model }

    /// Data shapes (bars, markers, wedges) in data order.
    pub fn shapes(&self) -> &[ShapeId] { &self.shapes }

    pub fn interactions(&self) -> &InteractionController { &self.behaviors.interactions }
    pub fn animations(&self) -> &AnimationController { &self.behaviors.animations }

    /// Route one pointer event to the interaction controller.
    ///
    /// While a bar is still growing its entry animation owns the top edge and
    /// height, so hover only changes x and width until the animation ends.
    pub fn dispatch(&mut self, surface: &mut Surface, event: PointerEvent, now: Duration) {
        let Behaviors { interactions, animations } = &mut self.behaviors;
        match event {
            PointerEvent::Enter { shape, at } => {
                interactions.pointer_enter(surface, shape, at, now);
                animations.hold(surface, shape);
            }
            PointerEvent::Move { shape, at } => interactions.pointer_move(shape, at),
            PointerEvent::Leave { shape } => {
                interactions.pointer_leave(surface, shape);
                animations.hold(surface, shape);
            }
        }
    }

    /// Raw pointer position from the host; hit-tests registered shapes and
    /// dispatches the resulting enter/move/leave events.
    pub fn pointer_at(&mut self, surface: &mut Surface, at: Point, now: Duration) {
        let interactions = &self.behaviors.interactions;
        let events = self.tracker.pointer_moved(surface, at, |id| interactions.is_registered(id));
        for event in events {
            self.dispatch(surface, event, now);
        }
    }

    /// Pointer left the surface entirely.
    pub fn pointer_exit(&mut self, surface: &mut Surface, now: Duration) {
        if let Some(event) = self.tracker.pointer_left() {
            self.dispatch(surface, event, now);
        }
    }

    /// One display-refresh tick: advance animations and fire due timers.
    /// Returns true while another frame is needed.
    pub fn on_frame(&mut self, surface: &mut Surface, now: Duration) -> bool {
        let animating = self.behaviors.animations.tick(surface);
        self.behaviors.interactions.poll(now);
        animating || self.behaviors.interactions.has_pending_timers()
    }

    /// Abort every running animation, snapping shapes to their final geometry.
    pub fn cancel_animations(&mut self, surface: &mut Surface) {
        self.behaviors.animations.cancel_all();
        self.behaviors.animations.tick(surface);
    }

    /// Cancellation token for the animation driving `shape`, if any.
    pub fn animation_token(&self, shape: ShapeId) -> Option<CancelToken> {
        self.behaviors.animations.token(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::normalize;
    use crate::surface::Document;
    use serde_json::json;

    fn model() -> (Document, ChartModel) {
        let mut doc = Document::new();
        doc.add_surface("c", 400.0, 300.0);
        let m = normalize(
            &json!({ "target": "#c", "data": [{ "value": 5, "label": "a", "color": "red" }] }),
            &doc,
        )
        .unwrap();
        (doc, m)
    }

    #[test]
    fn base_render_is_not_implemented() {
        let (mut doc, m) = model();
        let base = ChartBase::new(m);
        let surface = doc.resolve_mut("#c").unwrap();
        let err = base.render(surface, &Theme::default()).unwrap_err();
        assert!(matches!(err, DiagramError::NotImplemented("render")));
        assert!(surface.is_empty());
    }

    #[test]
    fn base_exposes_surface_size() {
        let (_, m) = model();
        let base = ChartBase::new(m);
        assert_eq!(base.surface_width(), 400.0);
        assert_eq!(base.surface_height(), 300.0);
    }

    #[test]
    fn expand_is_suppressed_for_pie() {
        assert!(ChartKind::Bar.supports_expand());
        assert!(ChartKind::Line.supports_expand());
        assert!(!ChartKind::Circular.supports_expand());
        assert!(!ChartKind::Circular.is_cartesian());
    }

    #[test]
    fn only_cartesian_kinds_draw_axes() {
        for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Circular] {
            let (mut doc, m) = model();
            let surface = doc.resolve_mut("#c").unwrap();
            Chart::new(kind, m).render(surface, &Theme::default()).unwrap();
            let lines = surface.iter().filter(|(_, s)| matches!(s, crate::surface::Shape::Line(_))).count();
            // two axes plus six gridlines
            assert_eq!(lines, if kind.is_cartesian() { 8 } else { 0 }, "{}", kind.name());
        }
    }

    #[test]
    fn no_behaviors_without_settings() {
        let (mut doc, m) = model();
        let surface = doc.resolve_mut("#c").unwrap();
        let chart = Chart::new(ChartKind::Bar, m).render(surface, &Theme::default()).unwrap();
        assert_eq!(chart.shapes().len(), 1);
        assert_eq!(chart.interactions().len(), 0);
        assert_eq!(chart.animations().len(), 0);
    }
}
