// File: crates/diagram-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a diagram surface (plus tooltip overlay) using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use diagram_core::interaction::TooltipBox;
use diagram_core::surface::{Shape, Surface, WedgeShape};
use diagram_core::{Color, Theme};

mod text;

pub use text::TextShaper;

const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 5.0;
const TOOLTIP_LINE_GAP: f32 = 2.0;

pub struct RenderOptions {
    pub theme: Theme,
    /// Skip text for pixel-stable snapshots across platforms.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::default(), draw_labels: true }
    }
}

/// Paints diagram surfaces onto Skia raster canvases.
pub struct SkiaRenderer {
    shaper: TextShaper,
    opts: RenderOptions,
}

impl SkiaRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { shaper: TextShaper::new(), opts }
    }

    /// Encode `surface` (and the tooltip, when one is showing) as PNG bytes.
    pub fn render_to_png_bytes(&self, surface: &Surface, tooltip: Option<&TooltipBox>) -> Result<Vec<u8>> {
        let width = surface.width().ceil() as i32;
        let height = surface.height().ceil() as i32;
        let mut raster = skia::surfaces::raster_n32_premul((width.max(1), height.max(1)))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = raster.canvas();

        canvas.clear(to_skia(self.opts.theme.background));
        self.paint_surface(canvas, surface);
        if let Some(tooltip) = tooltip {
            self.paint_tooltip(canvas, tooltip);
        }

        // Snapshot and encode PNG
        let image = raster.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        tracing::debug!(width, height, shapes = surface.len(), bytes = data.as_bytes().len(), "rasterized surface");
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file at `output_png_path`, creating parent directories.
    pub fn render_to_png(
        &self,
        surface: &Surface,
        tooltip: Option<&TooltipBox>,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(surface, tooltip)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write png {}", path.display()))?;
        Ok(())
    }

    /// Paint every shape in order onto `canvas`.
    pub fn paint_surface(&self, canvas: &skia::Canvas, surface: &Surface) {
        for (_, shape) in surface.iter() {
            match shape {
                Shape::Rect(r) => {
                    let rect = skia::Rect::from_xywh(r.rect.x as f32, r.rect.y as f32, r.rect.width as f32, r.rect.height as f32);
                    canvas.draw_rect(rect, &fill(r.fill));
                }
                Shape::Line(l) => {
                    canvas.draw_line(
                        (l.from.x as f32, l.from.y as f32),
                        (l.to.x as f32, l.to.y as f32),
                        &stroke(l.stroke, l.stroke_width),
                    );
                }
                Shape::Circle(c) => {
                    canvas.draw_circle((c.center.x as f32, c.center.y as f32), c.radius as f32, &fill(c.fill));
                }
                Shape::Polyline(p) => {
                    let Some((first, rest)) = p.points.split_first() else { continue };
                    let mut path = skia::Path::new();
                    path.move_to((first.x as f32, first.y as f32));
                    for pt in rest {
                        path.line_to((pt.x as f32, pt.y as f32));
                    }
                    canvas.draw_path(&path, &stroke(p.stroke, p.stroke_width));
                }
                Shape::Wedge(w) => {
                    canvas.draw_path(&wedge_path(w), &fill(w.fill));
                }
                Shape::Text(t) if self.opts.draw_labels => {
                    self.shaper.draw_anchored(
                        canvas,
                        &t.content,
                        t.position.x as f32,
                        t.position.y as f32,
                        t.font_size as f32,
                        to_skia(t.fill),
                        t.anchor,
                    );
                }
                Shape::Text(_) => {}
            }
        }
    }

    /// Paint the tooltip box at its position, faded and scaled by its current state.
    pub fn paint_tooltip(&self, canvas: &skia::Canvas, tooltip: &TooltipBox) {
        if !tooltip.visible || tooltip.opacity <= 0.0 {
            return;
        }
        let theme = &self.opts.theme;
        let alpha = tooltip.opacity.clamp(0.0, 1.0);

        let text_w = if self.opts.draw_labels {
            self.shaper
                .measure_width(&tooltip.title, TOOLTIP_FONT_SIZE, true)
                .max(self.shaper.measure_width(&tooltip.value, TOOLTIP_FONT_SIZE, false))
        } else {
            TOOLTIP_FONT_SIZE * 4.0
        };
        let w = text_w + 2.0 * TOOLTIP_PADDING;
        let h = 2.0 * TOOLTIP_FONT_SIZE + TOOLTIP_LINE_GAP + 2.0 * TOOLTIP_PADDING;
        let (x, y) = (tooltip.position.x as f32, tooltip.position.y as f32);

        canvas.save();
        canvas.translate((x, y));
        canvas.scale((tooltip.scale as f32, tooltip.scale as f32));
        let rect = skia::Rect::from_xywh(0.0, 0.0, w, h);
        canvas.draw_rect(rect, &fill(faded(theme.tooltip_background, alpha)));
        canvas.draw_rect(rect, &stroke(faded(theme.tooltip_border, alpha), 1.0));
        if self.opts.draw_labels {
            let color = to_skia(faded(theme.tooltip_text, alpha));
            self.shaper.draw_top_left(canvas, &tooltip.title, TOOLTIP_PADDING, TOOLTIP_PADDING, TOOLTIP_FONT_SIZE, color, true);
            let second = TOOLTIP_PADDING + TOOLTIP_FONT_SIZE + TOOLTIP_LINE_GAP;
            self.shaper.draw_top_left(canvas, &tooltip.value, TOOLTIP_PADDING, second, TOOLTIP_FONT_SIZE, color, false);
        }
        canvas.restore();
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn faded(c: Color, alpha: f64) -> Color {
    Color { a: (f64::from(c.a) * alpha).round() as u8, ..c }
}

fn fill(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(color));
    paint
}

fn stroke(color: Color, width: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(to_skia(color));
    paint
}

/// Centre, arc start, clockwise arc, back to centre.
fn wedge_path(w: &WedgeShape) -> skia::Path {
    let (cx, cy, r) = (w.center.x as f32, w.center.y as f32, w.radius as f32);
    let oval = skia::Rect::from_ltrb(cx - r, cy - r, cx + r, cy + r);
    let start = w.arc_start();
    let mut path = skia::Path::new();
    path.move_to((cx, cy));
    path.line_to((start.x as f32, start.y as f32));
    path.arc_to(oval, w.start_angle.to_degrees() as f32, w.sweep().to_degrees() as f32, false);
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_scales_alpha() {
        assert_eq!(faded(Color::BLACK, 0.5).a, 128);
        assert_eq!(faded(Color::rgba(1, 2, 3, 100), 0.0).a, 0);
    }

    #[test]
    fn color_channels_map_to_argb() {
        let c = to_skia(Color::rgba(10, 20, 30, 40));
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (40, 10, 20, 30));
    }
}
