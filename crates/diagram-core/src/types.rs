// File: crates/diagram-core/src/types.rs
// Summary: Shared layout constants (paddings, offsets, limits) and small value types.

/// Left padding reserved for the y axis, in surface units.
/// Also the fixed term in the bar width derivation.
pub const AXIS_PADDING: f64 = 50.0;

/// Distance between the bottom of a bar and the bottom of the surface.
pub const BASELINE_OFFSET: f64 = 30.0;

/// Distance between a category label's baseline and the bottom of the surface.
pub const LABEL_OFFSET: f64 = 10.0;

/// Number of value rows on a cartesian axis; `ROW_COUNT + 1` tick lines are drawn.
pub const ROW_COUNT: usize = 5;

/// Longest accepted data label, in characters.
pub const MAX_LABEL_LEN: usize = 20;

/// Frame-step divisor used when `animation.speed` is absent.
pub const DEFAULT_ANIMATION_SPEED: f64 = 100.0;

/// Radius of line chart markers.
pub const MARKER_RADIUS: f64 = 4.0;

/// Stroke width of the line chart polyline.
pub const LINE_STROKE_WIDTH: f64 = 2.0;

/// Horizontal text alignment relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` keyword.
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font sizes for the two cartesian axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    pub x_axis: f64,
    pub y_axis: f64,
}

impl FontSizes {
    /// Tier font sizes by surface width (x axis) and height (y axis).
    pub fn for_surface(width: f64, height: f64) -> Self {
        let x_axis = if width < 200.0 {
            4.0
        } else if width < 400.0 {
            8.0
        } else if width <= 600.0 {
            12.0
        } else {
            14.0
        };
        let y_axis = if height < 200.0 {
            4.0
        } else if height < 400.0 {
            8.0
        } else if height < 600.0 {
            12.0
        } else {
            14.0
        };
        Self { x_axis, y_axis }
    }
}

/// Gap between adjacent bars, tiered by surface width.
pub fn bar_spacing_for(width: f64) -> f64 {
    if width < 200.0 {
        1.0
    } else if width < 600.0 {
        5.0
    } else {
        10.0
    }
}
