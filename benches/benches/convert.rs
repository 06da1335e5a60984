//! Benchmark suite for binary CGM decoding and clear-text emission.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use cgm_benches::{generate_descriptor_stream, generate_polyline_stream};
use cgm_types::Metafile;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Decode throughput over polyline-heavy streams of increasing size.
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode");

	for points in [100usize, 1_000, 10_000] {
		let data = generate_polyline_stream(1, 10, points);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("polylines", points), &data, |b, data| {
			b.iter(|| {
				let metafile = Metafile::from_bytes(black_box(data), "bench");
				black_box(metafile)
			});
		});
	}

	group.finish();
}

/// Decode throughput when descriptor elements keep mutating the context.
fn bench_decode_descriptor_churn(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_descriptor_churn");

	let data = generate_descriptor_stream(1_000);
	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("mixed", |b| {
		b.iter(|| {
			let metafile = Metafile::from_bytes(black_box(&data), "bench");
			black_box(metafile)
		});
	});

	group.finish();
}

/// Emission throughput over a pre-decoded command sequence.
fn bench_emit(c: &mut Criterion) {
	let mut group = c.benchmark_group("emit");

	let data = generate_polyline_stream(1, 10, 1_000);
	let metafile = Metafile::from_bytes(&data, "bench");
	group.throughput(Throughput::Elements(metafile.commands().len() as u64));
	group.bench_function("polylines", |b| {
		b.iter(|| {
			let (text, diagnostics) = black_box(&metafile).to_clear_text();
			black_box((text, diagnostics))
		});
	});

	group.finish();
}

criterion_group!(benches, bench_decode, bench_decode_descriptor_churn, bench_emit);
criterion_main!(benches);
