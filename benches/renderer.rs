use bridge_diagram_renderer::config::{BridgeConfig, BridgeOverrides, Config};
use bridge_diagram_renderer::geometry::{cable_curve, deck_outline, derive_layout, hanger_positions};
use bridge_diagram_renderer::render::render_svg;
use bridge_diagram_renderer::scene::compose;
use bridge_diagram_renderer::surface::Recorder;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bridge_with_spacing(hanger_spacing: f32) -> BridgeConfig {
    let mut bridge = BridgeConfig::default();
    bridge.apply(&BridgeOverrides {
        hanger_spacing: Some(hanger_spacing),
        ..BridgeOverrides::default()
    });
    bridge
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    for step in [10.0_f32, 2.0, 0.5] {
        let bridge = BridgeConfig::default();
        let layout = derive_layout(&bridge);
        group.bench_with_input(BenchmarkId::new("deck_outline", step), &step, |b, &step| {
            b.iter(|| deck_outline(black_box(&bridge), black_box(&layout), step))
        });
        group.bench_with_input(BenchmarkId::new("cable_curve", step), &step, |b, &step| {
            b.iter(|| cable_curve(black_box(&bridge), black_box(&layout), step))
        });
    }
    for spacing in [60.0_f32, 10.0, 1.0] {
        let bridge = bridge_with_spacing(spacing);
        let layout = derive_layout(&bridge);
        group.bench_with_input(BenchmarkId::new("hangers", spacing), &spacing, |b, _| {
            b.iter(|| hanger_positions(black_box(&bridge), black_box(&layout)).count())
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("compose_recorder", |b| {
        b.iter(|| {
            let mut recorder = Recorder::new();
            compose(&mut recorder, black_box(&config));
            recorder.commands.len()
        })
    });
}

fn bench_render_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    for spacing in [60.0_f32, 20.0, 5.0] {
        let config = Config {
            bridge: bridge_with_spacing(spacing),
            ..Config::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(spacing), &config, |b, config| {
            b.iter(|| render_svg(black_box(config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_compose, bench_render_svg);
criterion_main!(benches);
