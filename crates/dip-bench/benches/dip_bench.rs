//! Benchmarks for dip operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use dip_core::Gray8;
use dip_ops::filter::{convolve, Kernel};
use dip_ops::histogram::equalize;
use dip_ops::order::{apply_window_filter, WindowFilter};
use dip_ops::restore::{gaussian_psf, inverse_filter};
use dip_ops::spectrum::{log_magnitude, Spectrum};
use dip_ops::BorderMode;

fn test_image(width: u32, height: u32) -> Gray8 {
    Gray8::from_fn(width, height, |x, y| [((x * 7 + y * 13) ^ (x * y)) as u8])
}

/// Benchmark order-statistic filters at the exercise window sizes.
fn bench_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("order");
    let img = test_image(256, 256);
    group.throughput(Throughput::Elements(256 * 256));

    for size in [3usize, 7, 9] {
        group.bench_with_input(BenchmarkId::new("median", size), &size, |b, &n| {
            b.iter(|| apply_window_filter(black_box(&img), WindowFilter::Median, n, BorderMode::Reflect))
        });
        group.bench_with_input(BenchmarkId::new("contraharmonic", size), &size, |b, &n| {
            b.iter(|| {
                apply_window_filter(
                    black_box(&img),
                    WindowFilter::Contraharmonic { q: 1.0 },
                    n,
                    BorderMode::Reflect,
                )
            })
        });
    }

    group.finish();
}

/// Benchmark spatial correlation.
fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");
    let img = test_image(640, 480);
    group.throughput(Throughput::Elements(640 * 480));

    for size in [3usize, 11, 31] {
        let kernel = Kernel::box_filter(size).unwrap();
        group.bench_with_input(BenchmarkId::new("box", size), &kernel, |b, k| {
            b.iter(|| convolve(black_box(&img), k, BorderMode::Replicate))
        });
    }

    group.finish();
}

/// Benchmark the 2D DFT and the inverse filter built on it.
fn bench_dft(c: &mut Criterion) {
    let mut group = c.benchmark_group("dft");

    for (w, h) in [(256u32, 256u32), (640, 480)] {
        let img = test_image(w, h);
        let label = format!("{}x{}", w, h);
        group.throughput(Throughput::Elements(w as u64 * h as u64));

        group.bench_with_input(BenchmarkId::new("forward", &label), &img, |b, img| {
            b.iter(|| Spectrum::forward(black_box(img)))
        });
        group.bench_with_input(BenchmarkId::new("log_magnitude", &label), &img, |b, img| {
            b.iter(|| log_magnitude(black_box(img)))
        });
    }

    let img = test_image(256, 256);
    let psf = gaussian_psf(31, 7.0).unwrap();
    group.bench_function("inverse_filter_256", |b| {
        b.iter(|| inverse_filter(black_box(&img), &psf, 1e-3))
    });

    group.finish();
}

/// Benchmark histogram equalization.
fn bench_equalize(c: &mut Criterion) {
    let img = test_image(640, 480);
    c.bench_function("equalize_640x480", |b| b.iter(|| equalize(black_box(&img))));
}

criterion_group!(benches, bench_order, bench_convolve, bench_dft, bench_equalize);
criterion_main!(benches);
