//! Performance benchmarks for margin detection
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgb, RgbImage};
use pdf_trim::{content_bbox, trim, Raster};

/// US Letter at the given DPI with a black block covering the text area
fn letter_page(dpi: u32) -> Raster {
    let width = 85 * dpi / 10;
    let height = 11 * dpi;
    let margin = dpi;
    let img = RgbImage::from_fn(width, height, |x, y| {
        if x >= margin && x < width - margin && y >= margin && y < height - margin {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    Raster::from_image(DynamicImage::ImageRgb8(img))
}

/// Benchmark bounding-box detection at common render resolutions
fn bench_content_bbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_bbox");

    for dpi in [72u32, 150, 300] {
        let page = letter_page(dpi);
        group.throughput(Throughput::Bytes(page.samples().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dpi), &page, |b, page| {
            b.iter(|| content_bbox(black_box(page)));
        });
    }

    group.finish();
}

/// Benchmark detection plus crop on a blank page (worst case: full scan, no crop)
fn bench_trim_blank(c: &mut Criterion) {
    let blank = Raster::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        2550,
        3300,
        Rgb([255, 255, 255]),
    )));

    c.bench_function("trim_blank_letter_300dpi", |b| {
        b.iter(|| trim(black_box(blank.clone())));
    });
}

criterion_group!(benches, bench_content_bbox, bench_trim_blank);
criterion_main!(benches);
