// File: crates/diagram-demo/src/main.rs
// Summary: Demo loads a JSON config or a value,label,color CSV and renders all three chart kinds to SVG and PNG.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use diagram_core::{
    theme, write_svg, ChartConfig, ChartKind, DiagramFactory, Document, Interactivity, Point, RenderedChart, Surface,
};
use diagram_render_skia::{RenderOptions, SkiaRenderer};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_TARGET: &str = "#demo";
/// Virtual frame interval used to fast-forward animations and tooltip timers.
const FRAME: Duration = Duration::from_millis(16);

/// Render bar, line and pie diagrams from one data set.
#[derive(Parser, Debug)]
#[command(name = "diagram-demo")]
#[command(about = "Render bar, line and pie diagrams to SVG and PNG")]
struct Args {
    /// JSON chart config (`target`, `data`, `interactivity`, `animation`, `decoration`)
    #[arg(long, conflicts_with = "csv")]
    config: Option<PathBuf>,

    /// CSV with `value,label,color` columns
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Surface width
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// Surface height
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Theme preset (classic, dark)
    #[arg(long, default_value = "classic")]
    theme: String,

    /// Hover the first data shape and capture the tooltip once it has faded in
    #[arg(long)]
    hover: bool,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    value: f64,
    label: String,
    color: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diagram_demo=info,diagram_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let target = config
        .get("target")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TARGET)
        .to_owned();
    let surface_id = target.strip_prefix('#').unwrap_or(&target).to_owned();

    let theme = theme::find(&args.theme);
    let factory = DiagramFactory::new(config).with_theme(theme);
    let renderer = SkiaRenderer::new(RenderOptions { theme, ..RenderOptions::default() });

    let mut written = 0usize;
    for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Circular] {
        let mut doc = Document::new();
        doc.add_surface(surface_id.as_str(), args.width, args.height);
        let created = match kind {
            ChartKind::Bar => factory.create_bar_diagram(&mut doc),
            ChartKind::Line => factory.create_line_diagram(&mut doc),
            ChartKind::Circular => factory.create_circle_diagram(&mut doc),
        };
        // Failures were already logged by the factory.
        let Some(mut chart) = created else { continue };
        let surface = doc
            .resolve_mut(&target)
            .with_context(|| format!("surface {target} disappeared"))?;

        let frames = settle(&mut chart, surface);
        tracing::info!(kind = kind.name(), frames, shapes = surface.len(), "chart settled");
        if args.hover {
            hover_first(&mut chart, surface);
        }

        let png = args.out_dir.join(format!("diagram_{}.png", kind.name()));
        renderer
            .render_to_png(surface, chart.interactions().tooltip(), &png)
            .with_context(|| format!("rendering {}", png.display()))?;
        let svg = png.with_extension("svg");
        write_svg(surface, &svg)?;
        println!("Wrote {} and {}", png.display(), svg.display());
        written += 1;
    }

    if written == 0 {
        anyhow::bail!("no diagram could be rendered; see the errors above");
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Value> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        return serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()));
    }

    let mut config = match &args.csv {
        Some(path) => load_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
        None => sample_config(),
    };
    config.interactivity = Some(Interactivity { expand: true, tooltip_on_hover: true });
    Ok(config.to_value())
}

/// Load `value,label,color` rows into a config targeting the demo surface.
fn load_csv(path: &Path) -> Result<ChartConfig> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut config = ChartConfig::new(DEFAULT_TARGET);
    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("row {}", line + 2))?;
        config = config.point(row.value, row.label, row.color);
    }
    tracing::info!(rows = config.data.len(), path = %path.display(), "loaded csv");
    Ok(config)
}

fn sample_config() -> ChartConfig {
    ChartConfig::new(DEFAULT_TARGET)
        .point(10.0, "January", "#1f77b4")
        .point(42.0, "February", "#ff7f0e")
        .point(87.0, "March", "#2ca02c")
        .point(15.0, "April", "#d62728")
        .point(63.0, "May", "#9467bd")
}

/// Drive frames until animations and timers are done; returns the frame count.
fn settle(chart: &mut RenderedChart, surface: &mut Surface) -> u32 {
    let mut frames = 0;
    let mut now = Duration::ZERO;
    while chart.on_frame(surface, now) {
        frames += 1;
        now += FRAME;
    }
    frames
}

fn hover_first(chart: &mut RenderedChart, surface: &mut Surface) {
    let Some(&first) = chart.shapes().first() else { return };
    let Some(at) = surface.get(first).and_then(anchor_point) else { return };
    chart.pointer_at(surface, at, Duration::ZERO);
    chart.on_frame(surface, Duration::from_secs(1));
}

/// A point inside the shape, used to aim the simulated pointer.
fn anchor_point(shape: &diagram_core::Shape) -> Option<Point> {
    if let Some(r) = shape.as_rect() {
        return Some(Point::new(r.rect.x + r.rect.width / 2.0, r.rect.bottom() - 1.0));
    }
    if let Some(c) = shape.as_circle() {
        return Some(c.center);
    }
    shape.as_wedge().map(|w| {
        let mid = (w.start_angle + w.end_angle) / 2.0;
        diagram_core::geometry::polar(w.center, w.radius / 2.0, mid)
    })
}
