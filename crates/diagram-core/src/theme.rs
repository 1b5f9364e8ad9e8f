// File: crates/diagram-core/src/theme.rs
// Summary: Colors for the non-data parts of a chart (axes, grid, labels, tooltip).

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub label: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub tooltip_border: Color,
}

impl Theme {
    /// Black axes and text, grey gridlines on white.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            background: Color::WHITE,
            axis_line: Color::BLACK,
            grid: Color::GREY,
            axis_label: Color::BLACK,
            label: Color::BLACK,
            tooltip_background: Color::WHITE,
            tooltip_text: Color::BLACK,
            tooltip_border: Color::BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            axis_line: Color::rgb(180, 180, 190),
            grid: Color::rgb(40, 40, 45),
            axis_label: Color::rgb(235, 235, 245),
            label: Color::rgb(210, 210, 220),
            tooltip_background: Color::rgb(40, 40, 45),
            tooltip_text: Color::rgb(235, 235, 245),
            tooltip_border: Color::rgb(150, 150, 160),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::classic(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to classic.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::classic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_fallback() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("unknown").name, "classic");
    }
}
