//! Benchmarks for rotor machine operations.
//!
//! Measures preset assembly, single-symbol encoding with and without trace
//! recording, and message throughput scaling across message lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rotormachine::presets::{Model, Settings};
use rotormachine::{Machine, DEFAULT_FALLBACK};

/// Key sheet used consistently across all benchmarks.
fn bench_settings() -> Settings {
    Settings::new(&["II", "IV", "V"], "B")
        .with_rings("BUL")
        .with_positions("BLA")
        .with_plugs("AV BS CG DL FU HZ IN KM OW RX")
}

fn bench_machine() -> Machine {
    Model::EnigmaI
        .build(&bench_settings())
        .unwrap()
}

/// Benchmarks `Model::build()`: catalog lookup, wiring parsing and setup.
fn bench_preset_build(c: &mut Criterion) {
    let settings = bench_settings();
    c.bench_function("preset_build", |b| {
        b.iter(|| Model::EnigmaI.build(black_box(&settings)).unwrap());
    });
}

/// Benchmarks one key press without trace recording.
///
/// The machine is built once and its rotors advance naturally between
/// iterations, reflecting real streaming behavior.
fn bench_encode_char(c: &mut Criterion) {
    let mut machine = bench_machine();

    let mut group = c.benchmark_group("single_symbol");
    group.throughput(Throughput::Elements(1));

    group.bench_function("untraced", |b| {
        b.iter(|| machine.encode_char(black_box('A')).unwrap());
    });

    group.bench_function("traced", |b| {
        b.iter(|| {
            machine
                .process_character(black_box("A"), DEFAULT_FALLBACK)
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmarks `encode()` throughput across message lengths.
fn bench_message_scaling(c: &mut Criterion) {
    let lengths: &[usize] = &[16, 256, 4096];

    let mut group = c.benchmark_group("message_scaling");

    for &len in lengths {
        let text: String = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG"
            .chars()
            .cycle()
            .take(len)
            .collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            let mut machine = bench_machine();
            b.iter(|| {
                machine.reset();
                machine.encode(black_box(text)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_preset_build,
    bench_encode_char,
    bench_message_scaling,
);
criterion_main!(benches);
