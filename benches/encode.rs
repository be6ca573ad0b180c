//! Benchmarks for message encoding on the logging hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use femtoviewer::{LogMessage, LogPart, PartKey, PartValue, ViewerLevel, decode_message};

fn bench_log_entry(c: &mut Criterion) {
    c.bench_function("pack_text_log_entry", |b| {
        b.iter(|| {
            LogMessage::log_entry(
                black_box(1_700_000_000_123),
                "Bench",
                black_box(42),
                ViewerLevel::Info,
                PartValue::from("the quick brown fox jumps over the lazy dog"),
            )
            .and_then(|message| message.pack())
        })
    });

    let blob = vec![0xa5u8; 4096];
    c.bench_function("pack_binary_log_entry_4k", |b| {
        b.iter(|| {
            LogMessage::log_entry(
                1_700_000_000_123,
                "Bench",
                7,
                ViewerLevel::Debug,
                PartValue::Binary(black_box(blob.clone())),
            )
            .and_then(|message| message.pack())
        })
    });
}

fn bench_parts(c: &mut Criterion) {
    c.bench_function("int64_hex_part", |b| {
        b.iter(|| LogPart::int64_hex(PartKey::Level, black_box("0x0102030405060708")))
    });

    let packed = LogMessage::log_entry(0, "Bench", 1, ViewerLevel::Info, PartValue::from("x"))
        .and_then(|message| message.pack())
        .expect("pack sample");
    c.bench_function("decode_log_entry", |b| {
        b.iter(|| decode_message(black_box(&packed)))
    });
}

criterion_group!(benches, bench_log_entry, bench_parts);
criterion_main!(benches);
