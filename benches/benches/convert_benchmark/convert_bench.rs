use std::{hint::black_box, io::Cursor};

use chn_core::{convert, ChannelEncoder, RptReader};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Синтетический отчёт: `channels` каналов по 16 в строке.
fn synthetic_report(channels: usize) -> String {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut s = String::from(
        "Spectrum acquired 01-06-2020 13:45:30\nLive time: 3600.0\nReal time: 3612.5\n",
    );

    for row in 0..channels / 16 {
        s.push_str(&(row * 16).to_string());
        for _ in 0..16 {
            s.push(' ');
            s.push_str(&rng.gen_range(0u32..100_000).to_string());
        }
        s.push('\n');
    }
    s
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for channels in [1024usize, 8192, 16_384] {
        let text = synthetic_report(channels);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(channels), &text, |b, text| {
            let mut out = Vec::with_capacity(32 + channels * 4);
            b.iter(|| {
                out.clear();
                convert(Cursor::new(text.as_bytes()), &mut out).unwrap();
                black_box(out.len())
            })
        });
    }

    group.finish();
}

fn bench_parse_only(c: &mut Criterion) {
    let text = synthetic_report(8192);

    c.bench_function("read_report_8192", |b| {
        b.iter(|| {
            let report = RptReader::new(Cursor::new(text.as_bytes()))
                .read_report()
                .unwrap();
            black_box(report.channels.count)
        })
    });
}

fn bench_channel_line(c: &mut Criterion) {
    let line = synthetic_report(16).lines().nth(3).unwrap_or_default().to_string();

    c.bench_function("absorb_line_16", |b| {
        b.iter(|| {
            let mut enc = ChannelEncoder::new();
            black_box(enc.absorb_line(black_box(&line)).unwrap())
        })
    });
}

criterion_group!(benches, bench_convert, bench_parse_only, bench_channel_line);
criterion_main!(benches);
