// File: crates/diagram-core/src/animation.rs
// Summary: Bar growth animation as a frame-driven progress cursor with cooperative cancellation.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::chart::GeometryHints;
use crate::geometry::{clamp, Rect};
use crate::surface::{Shape, ShapeId, Surface};

/// Shared cancel flag. Clones observe the same flag; the controller checks it every tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.set(true) }
    pub fn is_cancelled(&self) -> bool { self.0.get() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
    Cancelled,
}

/// Bar growing upward from its baseline. After `n` frames the height is
/// `n * final_height / speed`, clamped to `final_height`; the bottom edge stays fixed.
#[derive(Clone, Debug)]
pub struct GrowAnimation {
    final_height: f64,
    final_y: f64,
    speed: f64,
    frame: u64,
    status: AnimationStatus,
    token: CancelToken,
}

impl GrowAnimation {
    pub fn new(final_height: f64, final_y: f64, speed: f64) -> Self {
        Self { final_height, final_y, speed, frame: 0, status: AnimationStatus::Running, token: CancelToken::new() }
    }

    /// Height added per frame.
    pub fn increment(&self) -> f64 { self.final_height / self.speed }

    /// Cursor in `0..=1`.
    pub fn progress(&self) -> f64 {
        match self.status {
            AnimationStatus::Running => clamp(self.frame as f64 / self.speed, 0.0, 1.0),
            AnimationStatus::Finished | AnimationStatus::Cancelled => 1.0,
        }
    }

    pub fn status(&self) -> AnimationStatus { self.status }
    pub fn token(&self) -> CancelToken { self.token.clone() }

    /// Bottom edge of the bar; fixed for the whole animation.
    fn baseline(&self) -> f64 { self.final_y + self.final_height }

    /// Height and top edge at the current cursor.
    pub fn current(&self) -> (f64, f64) {
        let progress = self.progress();
        if progress >= 1.0 {
            return (self.final_height, self.final_y);
        }
        let height = self.final_height * progress;
        (height, self.baseline() - height)
    }

    /// Advance one frame. Returns false once the animation is over.
    pub fn step(&mut self) -> bool {
        if self.status != AnimationStatus::Running {
            return false;
        }
        if self.token.is_cancelled() {
            self.status = AnimationStatus::Cancelled;
            return false;
        }
        self.frame += 1;
        if self.frame as f64 >= self.speed {
            self.status = AnimationStatus::Finished;
        }
        self.status == AnimationStatus::Running
    }

    fn write(&self, rect: &mut Rect) {
        let (height, y) = self.current();
        rect.height = height;
        rect.y = y;
    }
}

/// Entry animations for the shapes of one chart.
#[derive(Debug, Default)]
pub struct AnimationController {
    animations: BTreeMap<ShapeId, GrowAnimation>,
}

impl AnimationController {
    pub fn new() -> Self { Self::default() }

    /// Start a growth animation for a bar and rewind it to height 0.
    ///
    /// Only bar hints animate; marker and wedge hints are accepted and left untouched.
    pub fn register(&mut self, surface: &mut Surface, shape: ShapeId, hints: GeometryHints, speed: f64) -> Option<CancelToken> {
        let GeometryHints::Bar { final_height, final_y } = hints else {
            tracing::trace!(shape = shape.index(), ?hints, "no positional animation for this shape");
            return None;
        };
        let Some(Shape::Rect(bar)) = surface.get_mut(shape) else {
            tracing::warn!(shape = shape.index(), "bar animation needs a rectangle");
            return None;
        };

        let animation = GrowAnimation::new(final_height, final_y, speed);
        animation.write(&mut bar.rect);
        let token = animation.token();
        self.animations.insert(shape, animation);
        Some(token)
    }

    /// Advance every running animation by one frame and write the geometry back.
    /// Cancelled animations snap to their final geometry. Returns true while any is still running.
    pub fn tick(&mut self, surface: &mut Surface) -> bool {
        let mut running = false;
        for (shape, animation) in self.animations.iter_mut() {
            if animation.status() != AnimationStatus::Running {
                continue;
            }
            running |= animation.step();
            if let Some(Shape::Rect(bar)) = surface.get_mut(*shape) {
                animation.write(&mut bar.rect);
            }
            if animation.status() != AnimationStatus::Running {
                tracing::trace!(shape = shape.index(), status = ?animation.status(), frames = animation.frame, "animation done");
            }
        }
        running
    }

    /// Flag every animation for cancellation; takes effect on the next tick.
    pub fn cancel_all(&self) {
        for animation in self.animations.values() {
            animation.token.cancel();
        }
    }

    /// Rewrite the animated edges (top and height) of a running bar, leaving x and width to hover.
    pub fn hold(&self, surface: &mut Surface, shape: ShapeId) {
        let Some(animation) = self.animations.get(&shape).filter(|a| a.status() == AnimationStatus::Running) else {
            return;
        };
        if let Some(Shape::Rect(bar)) = surface.get_mut(shape) {
            animation.write(&mut bar.rect);
        }
    }

    pub fn token(&self, shape: ShapeId) -> Option<CancelToken> {
        self.animations.get(&shape).map(GrowAnimation::token)
    }

    pub fn status(&self, shape: ShapeId) -> Option<AnimationStatus> {
        self.animations.get(&shape).map(GrowAnimation::status)
    }

    pub fn len(&self) -> usize { self.animations.len() }
    pub fn is_empty(&self) -> bool { self.animations.is_empty() }
}
