// File: crates/diagram-core/src/lib.rs
// Summary: Core library entry point; exports the public API for config normalization, chart rendering and behaviors.

pub mod error;
pub mod types;
pub mod color;
pub mod geometry;
pub mod surface;
pub mod series;
pub mod config;
pub mod scale;
pub mod grid;
pub mod theme;
pub mod chart;
pub mod axis;
pub mod bar;
pub mod line;
pub mod circular;
pub mod interaction;
pub mod animation;
pub mod events;
pub mod factory;
pub mod svg;

pub use error::{ConfigError, DiagramError, DiagramResult};
pub use color::Color;
pub use geometry::{Point, Rect};
pub use surface::{Document, Shape, ShapeId, Surface};
pub use series::DataPoint;
pub use config::{normalize, ChartConfig, ChartModel, Interactivity, AnimationSettings, Decoration};
pub use scale::ScaleModel;
pub use theme::Theme;
pub use chart::{Chart, ChartBase, ChartKind, Diagram, GeometryHints, RenderedChart};
pub use interaction::{HoverState, InteractionController, TooltipBox};
pub use animation::{AnimationController, AnimationStatus, CancelToken};
pub use events::{PointerEvent, PointerTracker};
pub use factory::DiagramFactory;
pub use svg::{to_svg, write_svg};
