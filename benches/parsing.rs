//! Benchmarks for palette decoding and export.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use palettetool::types::MAX_COLORS;
use palettetool::{
    decode_aco, parse_palette_document, to_gpl, to_json, tokenize, AcoOptions, DEFAULT_MAX_TOKENS,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// A document holding one palette at full colour capacity.
fn full_document() -> String {
    let colors: Vec<String> = (0..MAX_COLORS)
        .map(|i| {
            let v = i as f32 / MAX_COLORS as f32;
            format!(
                r#"{{"name": "colour {i}", "red": {v}, "green": {}, "blue": {}, "alpha": 1}}"#,
                1.0 - v,
                v / 2.0
            )
        })
        .collect();
    let gradient: Vec<String> = (0..MAX_COLORS).map(|i| format!("\"colour {i}\"")).collect();
    format!(
        r#"{{"palettes": [{{"title": "full", "colors": [{}], "gradients": {{"all": [{}]}}}}]}}"#,
        colors.join(","),
        gradient.join(",")
    )
}

/// A swatch file with `count` named RGB colours.
fn aco_bytes(count: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&2u16.to_be_bytes());
    bytes.extend_from_slice(&count.to_be_bytes());
    for i in 0..count {
        let name: Vec<u16> = format!("swatch {i}").encode_utf16().collect();
        for field in [0, i * 257, 65535 - i * 257, i * 128, 0, 0] {
            bytes.extend_from_slice(&field.to_be_bytes());
        }
        bytes.extend_from_slice(&(name.len() as u16).to_be_bytes());
        for unit in name {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
    }
    bytes
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let sunset = load_fixture("sunset.json");
    let full = full_document();
    let aco = aco_bytes(MAX_COLORS as u16);
    let options = AcoOptions {
        source_url: None,
        timestamp: Some(0),
    };

    group.bench_function("tokenize_full", |b| {
        b.iter(|| tokenize(black_box(&full), DEFAULT_MAX_TOKENS).unwrap())
    });

    group.bench_function("parse_json_small", |b| {
        b.iter(|| parse_palette_document(black_box(&sunset), 0, DEFAULT_MAX_TOKENS).unwrap())
    });

    group.bench_function("parse_json_full", |b| {
        b.iter(|| parse_palette_document(black_box(&full), 0, DEFAULT_MAX_TOKENS).unwrap())
    });

    group.bench_function("decode_aco_full", |b| {
        b.iter(|| decode_aco(black_box(&aco), &options).unwrap())
    });

    group.finish();
}

// -- Export benchmarks --

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    let mut palette = parse_palette_document(&full_document(), 0, DEFAULT_MAX_TOKENS).unwrap();

    group.bench_function("sorted_gradients", |b| {
        b.iter(|| {
            let mut palette = palette.clone();
            palette.add_full_palette_gradients().unwrap();
            palette
        })
    });

    palette.add_full_palette_gradients().unwrap();

    group.bench_function("to_json", |b| {
        b.iter(|| to_json(std::slice::from_ref(black_box(&palette))).unwrap())
    });

    group.bench_function("to_gpl", |b| b.iter(|| to_gpl(black_box(&palette))));

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_export);
criterion_main!(benches);
