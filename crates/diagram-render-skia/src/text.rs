// File: crates/diagram-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; places text by SVG-style anchor and baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use diagram_core::types::TextAnchor;

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Arial", "Helvetica", "Segoe UI", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, bold).longest_line()
    }

    /// Draw with `(x, y)` as the baseline point named by `anchor`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_anchored(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        anchor: TextAnchor,
    ) {
        let paragraph = self.layout(text, size, color, false);
        let width = paragraph.longest_line();
        let left = match anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - width / 2.0,
            TextAnchor::End => x - width,
        };
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        paragraph.paint(canvas, (left, y - size * 0.8));
    }

    /// Draw with `(x, y)` as the top-left corner.
    pub fn draw_top_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, bold: bool) {
        self.layout(text, size, color, bold).paint(canvas, (x, y));
    }
}
