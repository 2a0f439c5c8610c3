//! Benchmark suite for the ghost codecs
//!
//! Measures filename parsing and serialization, name transcoding and the body checksums.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use wraith_benches::{generate_ghost_body, sample_record};
use wraith_types::file::{
	FilenameLayout, GameVersion, GhostFile, MiiLocation, NameCodec,
	checksum::{crc16_xmodem, crc32},
};

/// Benchmark filename parsing for every stem length
fn bench_filename_parse(c: &mut Criterion) {
	let mut group = c.benchmark_group("filename_parse");
	let layout = FilenameLayout::current();

	for version in [GameVersion::V3, GameVersion::V4] {
		let Ok(stem) = layout.serialize(&sample_record(version)) else {
			eprintln!("Warning: could not build a {version:?} stem");
			continue;
		};
		group.throughput(Throughput::Bytes(stem.len() as u64));
		group.bench_with_input(BenchmarkId::new("parse", format!("{version:?}")), &stem, |b, stem| {
			b.iter(|| black_box(layout.parse(black_box(stem))));
		});
	}

	group.finish();
}

/// Benchmark filename serialization
fn bench_filename_serialize(c: &mut Criterion) {
	let mut group = c.benchmark_group("filename_serialize");
	let layout = FilenameLayout::current();

	for version in [GameVersion::V3, GameVersion::V4] {
		let record = sample_record(version);
		group.bench_with_input(BenchmarkId::new("serialize", format!("{version:?}")), &record, |b, record| {
			b.iter(|| black_box(layout.serialize(black_box(record))));
		});
	}

	group.finish();
}

/// Benchmark player name transcoding
fn bench_name_codec(c: &mut Criterion) {
	let mut group = c.benchmark_group("name_codec");
	let codec = NameCodec::filename();
	let Ok(hex) = codec.encode_hex("Nin★Chris") else {
		return;
	};

	group.bench_function("encode_hex", |b| {
		b.iter(|| black_box(codec.encode_hex(black_box("Nin★Chris"))));
	});
	group.bench_function("decode_hex", |b| {
		b.iter(|| black_box(codec.decode_hex(black_box(&hex))));
	});

	group.finish();
}

/// Benchmark the body checksums
fn bench_checksums(c: &mut Criterion) {
	let mut group = c.benchmark_group("checksums");
	let data = generate_ghost_body(0x21, true);
	let file = GhostFile::from_bytes(data.clone());

	group.throughput(Throughput::Bytes(file.payload().len() as u64));
	group.bench_function("crc32_payload", |b| {
		b.iter(|| black_box(crc32(black_box(file.payload()))));
	});

	let record = &data[MiiLocation::Headed.offset()..MiiLocation::Headed.offset() + 0x5E];
	group.bench_function("crc16_mii", |b| {
		b.iter(|| black_box(crc16_xmodem(black_box(record))));
	});

	group.finish();
}

/// Benchmark a full body edit: track change plus checksum refresh
fn bench_body_edit(c: &mut Criterion) {
	let mut group = c.benchmark_group("body_edit");
	let file = GhostFile::from_bytes(generate_ghost_body(0x21, true));

	group.bench_function("change_track", |b| {
		b.iter(|| {
			let mut file = file.clone();
			let result = file.set_track_slot(black_box(27)).and_then(|()| file.recompute_checksum());
			black_box(result)
		});
	});

	group.bench_function("extract_mii", |b| {
		b.iter(|| black_box(file.extract_mii(MiiLocation::Headed, true)));
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_filename_parse,
	bench_filename_serialize,
	bench_name_codec,
	bench_checksums,
	bench_body_edit
);
criterion_main!(benches);
