//! Benchmarks for camera fitting and the per-frame approach.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use vantage::camera::{fit, ViewController, ViewPreset};
use vantage::model::BoundingBox;
use vantage::options::CameraOptions;

fn fit_benchmark(c: &mut Criterion) {
    let size = Vec3::new(2.0, 3.0, 1.0);
    let _ = c.bench_function("camera_fit", |b| {
        b.iter(|| black_box(fit(black_box(size), 50f32.to_radians(), 1.2)))
    });
}

fn bounds_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds_from_points");
    for count in [1_000usize, 100_000] {
        let points: Vec<Vec3> = (0..count)
            .map(|i| {
                let t = i as f32;
                Vec3::new(t.sin(), t.cos(), t * 0.001)
            })
            .collect();
        let _ = group.bench_function(count.to_string(), |b| {
            b.iter(|| black_box(BoundingBox::from_points(black_box(&points).iter().copied())))
        });
    }
    group.finish();
}

fn frame_advance_benchmark(c: &mut Criterion) {
    let bounds = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let _ = c.bench_function("preset_approach_until_settled", |b| {
        b.iter(|| {
            let mut view = ViewController::new(
                CameraOptions::default(),
                ViewPreset::Isometric,
                16.0 / 9.0,
            );
            let _ = view.on_model_loaded(&bounds);
            view.select_preset(ViewPreset::Top);
            let mut frames = 0u32;
            while view.on_frame_advance(1.0 / 60.0) {
                frames += 1;
            }
            black_box(frames)
        })
    });
}

criterion_group!(
    benches,
    fit_benchmark,
    bounds_benchmark,
    frame_advance_benchmark
);
criterion_main!(benches);
