// File: crates/diagram-core/src/svg.rs
// Summary: Serialize a surface to a standalone SVG document.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;

use crate::color::Color;
use crate::surface::{Shape, Surface};

/// Render every shape in paint order as SVG markup.
pub fn to_svg(surface: &Surface) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, surface);
    out
}

/// Write the SVG for `surface` to `path`, creating parent directories.
pub fn write_svg(surface: &Surface, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    }
    std::fs::write(path, to_svg(surface)).with_context(|| format!("write svg {}", path.display()))?;
    tracing::debug!(path = %path.display(), shapes = surface.len(), "wrote svg");
    Ok(())
}

fn write_document(out: &mut String, surface: &Surface) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = surface.width(),
        h = surface.height()
    )?;
    for (_, shape) in surface.iter() {
        out.push_str("  ");
        write_shape(out, shape)?;
        out.push('\n');
    }
    out.push_str("</svg>\n");
    Ok(())
}

fn write_shape(out: &mut String, shape: &Shape) -> std::fmt::Result {
    match shape {
        Shape::Rect(r) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}"#,
                r.rect.x,
                r.rect.y,
                r.rect.width,
                r.rect.height,
                fill(r.fill)
            )?;
            if let Some(t) = &r.transition {
                write!(out, r#" style="transition: {}""#, t.to_css())?;
            }
            out.push_str("/>");
        }
        Shape::Line(l) => write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            l.from.x,
            l.from.y,
            l.to.x,
            l.to.y,
            stroke(l.stroke, l.stroke_width)
        )?,
        Shape::Circle(c) => {
            write!(out, r#"<circle cx="{}" cy="{}" r="{}"{}"#, c.center.x, c.center.y, c.radius, fill(c.fill))?;
            if let Some(t) = &c.transition {
                write!(out, r#" style="transition: {}""#, t.to_css())?;
            }
            out.push_str("/>");
        }
        Shape::Polyline(p) => {
            let points: Vec<String> = p.points.iter().map(|pt| format!("{},{}", pt.x, pt.y)).collect();
            write!(
                out,
                r#"<polyline points="{}" fill="none"{}/>"#,
                points.join(" "),
                stroke(p.stroke, p.stroke_width)
            )?;
        }
        Shape::Wedge(w) => write!(out, r#"<path d="{}"{}/>"#, w.path_data(), fill(w.fill))?,
        Shape::Text(t) => write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}"{}>{}</text>"#,
            t.position.x,
            t.position.y,
            t.font_size,
            t.anchor.as_svg(),
            fill(t.fill),
            escape(&t.content)
        )?,
    }
    Ok(())
}

fn fill(c: Color) -> String {
    let mut s = format!(r#" fill="{}""#, opaque_hex(c));
    if c.a < 255 {
        let _ = write!(s, r#" fill-opacity="{}""#, c.opacity());
    }
    s
}

fn stroke(c: Color, width: f64) -> String {
    format!(r#" stroke="{}" stroke-width="{}""#, opaque_hex(c), width)
}

/// Alpha goes to `*-opacity` so viewers without 8-digit hex support agree.
fn opaque_hex(c: Color) -> String {
    Color { a: 255, ..c }.to_hex()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
