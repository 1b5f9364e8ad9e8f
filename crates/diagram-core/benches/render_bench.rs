use diagram_core::{to_svg, ChartKind, DiagramResult, DiagramFactory, Document};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use serde_json::{json, Value};

fn build_config(n: usize) -> Value {
    let palette = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];
    let data: Vec<Value> = (0..n)
        .map(|i| {
            let v = ((i as f64 * 0.7).sin() * 40.0 + 50.0).round();
            json!({ "value": v, "label": format!("p{i}"), "color": palette[i % palette.len()] })
        })
        .collect();
    json!({
        "target": "#bench",
        "data": data,
        "interactivity": { "expand": true, "tooltipOnHover": true },
        "animation": { "speed": 60 },
    })
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_surface");
    for &n in &[10usize, 100usize] {
        for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Circular] {
            group.bench_function(format!("{}_{n}", kind.name()), |b| {
                let factory = DiagramFactory::new(build_config(n));
                b.iter(|| -> DiagramResult<()> {
                    let mut doc = Document::new();
                    doc.add_surface("bench", 1600.0, 600.0);
                    let chart = factory.try_create(kind, &mut doc)?;
                    black_box(chart.shapes().len());
                    if let Some(surface) = doc.resolve("#bench") {
                        black_box(to_svg(surface));
                    }
                    Ok(())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
