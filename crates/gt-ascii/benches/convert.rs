use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gt_ascii::convert::{ConvertOptions, convert_frame};
use gt_ascii::matcher::nearest_symbol;
use gt_core::frame::FrameBuffer;
use gt_core::preset::{BrightnessTable, Preset};

fn gradient(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) % 256) as u8;
            frame.set_pixel(x, y, (v, v / 2, 255 - v));
        }
    }
    frame
}

fn charset_table() -> BrightnessTable {
    " .:-=+*#%@"
        .chars()
        .enumerate()
        .map(|(i, c)| (c, i as f64 * 28.0))
        .collect()
}

fn bench_convert(c: &mut Criterion) {
    let frame = gradient(1280, 720);
    let preset = Preset {
        cell_width: 8,
        cell_height: 16,
        brightness: charset_table(),
    };
    let options = ConvertOptions {
        output_width: 160,
        ..ConvertOptions::default()
    };

    c.bench_function("convert_frame 1280x720 -> 160 cols", |b| {
        b.iter(|| convert_frame(black_box(&frame), black_box(&preset), &options));
    });
}

fn bench_matcher(c: &mut Criterion) {
    let table = charset_table();
    c.bench_function("nearest_symbol x256", |b| {
        b.iter(|| {
            for v in 0..=255u8 {
                black_box(nearest_symbol(f64::from(v), &table));
            }
        });
    });
}

criterion_group!(benches, bench_convert, bench_matcher);
criterion_main!(benches);
