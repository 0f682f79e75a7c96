//! Benchmarks for imtools operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgba, RgbaImage};

use imtools_analyze::palette::{filter_by_brightness, KmeansExtractor, KmeansOptions, PaletteExtractor};
use imtools_color::{parse_hex, Color};
use imtools_ops::{filter, resize, transform, BlurOptions, Filter};

/// Padded gradient logo: `size` x `size` with a quarter-size transparent margin.
fn test_logo(size: u32) -> DynamicImage {
    let margin = size / 4;
    let buf = RgbaImage::from_fn(size, size, |x, y| {
        if x < margin || y < margin || x >= size - margin || y >= size - margin {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([(x * 255 / size) as u8, (y * 255 / size) as u8, 128, 255])
        }
    });
    DynamicImage::ImageRgba8(buf)
}

/// Benchmark hex parsing and the perceptual metrics.
fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    let hexes: Vec<String> = (0..10000u32).map(|i| format!("#{:06x}", i * 1677)).collect();
    let colors: Vec<Color> = hexes.iter().filter_map(|h| parse_hex(h).ok()).collect();
    group.throughput(Throughput::Elements(hexes.len() as u64));

    group.bench_function("parse_hex", |b| {
        b.iter(|| hexes.iter().map(|h| parse_hex(black_box(h))).collect::<Vec<_>>())
    });

    group.bench_function("brightness", |b| {
        b.iter(|| colors.iter().map(|c| black_box(*c).brightness()).sum::<f64>())
    });

    group.bench_function("saturation", |b| {
        b.iter(|| {
            colors
                .iter()
                .filter_map(|c| black_box(*c).saturation().ok())
                .sum::<f64>()
        })
    });

    group.bench_function("filter_by_brightness", |b| {
        b.iter(|| filter_by_brightness(black_box(colors.clone()), Some(160.0)))
    });

    group.finish();
}

/// Benchmark box and gaussian blur.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");

    for size in [64u32, 256, 512].iter() {
        let img = test_logo(*size);
        group.throughput(Throughput::Elements((*size as u64) * (*size as u64)));

        let boxed = BlurOptions::with_sigma(8.0);
        group.bench_with_input(BenchmarkId::new("box_8", size), &img, |b, img| {
            b.iter(|| filter::blur(black_box(img), &boxed))
        });

        let gauss = BlurOptions::gaussian(2.0);
        group.bench_with_input(BenchmarkId::new("gaussian_2", size), &img, |b, img| {
            b.iter(|| filter::blur(black_box(img), &gauss))
        });
    }

    group.finish();
}

/// Benchmark trim, downsampling and averaging.
fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");

    for size in [256u32, 1024].iter() {
        let img = test_logo(*size);
        group.throughput(Throughput::Elements((*size as u64) * (*size as u64)));

        group.bench_with_input(BenchmarkId::new("trim", size), &img, |b, img| {
            b.iter(|| transform::trim(black_box(img), 0.1))
        });

        group.bench_with_input(BenchmarkId::new("fit_within_128", size), &img, |b, img| {
            b.iter(|| resize::fit_within(black_box(img), 128, Filter::Lanczos3))
        });

        group.bench_with_input(BenchmarkId::new("average", size), &img, |b, img| {
            b.iter(|| resize::average(black_box(img)))
        });
    }

    group.finish();
}

/// Benchmark k-means palette extraction on a downsampled logo.
fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");
    group.sample_size(20);

    let sample = test_logo(128).to_rgba8();
    let extractor = KmeansExtractor::new(KmeansOptions::default());

    for k in [3usize, 5, 8].iter() {
        group.bench_with_input(BenchmarkId::new("kmeans", k), k, |b, &k| {
            b.iter(|| extractor.extract(black_box(&sample), k))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_color, bench_blur, bench_geometry, bench_palette);
criterion_main!(benches);
