use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{GrayImage, Luma};

use halftone_lines::geometry::Rotation;
use halftone_lines::scan::Scanner;
use halftone_lines::{HalftoneConfig, HalftoneLines};

fn test_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]))
}

fn bench_scan(c: &mut Criterion) {
    let image = test_image(400, 300);
    let mut group = c.benchmark_group("scan");
    for degrees in [0.0, 20.0, 45.0] {
        group.bench_with_input(BenchmarkId::from_parameter(degrees), &degrees, |b, &deg| {
            b.iter(|| {
                let scanner = Scanner::new(&image, 6, Rotation::from_degrees(deg))
                    .expect("valid scanner");
                black_box(scanner.scan().expect("scan succeeds"))
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let image = test_image(200, 150);
    let settings = HalftoneConfig {
        kernel: Some(4),
        side: 12,
        contrast: false,
        ..HalftoneConfig::default()
    }
    .resolve(200, 150)
    .expect("valid settings");

    c.bench_function("render_200x150", |b| {
        b.iter(|| {
            let pipeline = HalftoneLines::new(image.clone(), settings);
            black_box(pipeline.render().expect("renders"))
        });
    });
}

criterion_group!(benches, bench_scan, bench_render);
criterion_main!(benches);
