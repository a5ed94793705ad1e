use chromadoc::helper::chroma;
use chromadoc::{inverse, Color, ContrastPair, InverseOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn run_benchmarks(c: &mut Criterion) {
    let options = InverseOptions::default();
    let coarse = InverseOptions::builder().step(0.2).build();
    let bases = [
        Color::BLACK,
        Color::WHITE,
        Color::from_24bit(0x33, 0x66, 0x99),
        Color::from_24bit(0xff, 0x69, 0xb4),
        Color::from_24bit(0x80, 0x80, 0x80),
    ];
    let pair = ContrastPair::new(Color::WHITE, Color::BLACK);

    let mut group = c.benchmark_group("inverse");

    group.bench_function("derived", |b| {
        b.iter(|| {
            for base in &bases {
                let _ = inverse(black_box(base), None, &options);
            }
        })
    });

    group.bench_function("derived-coarse", |b| {
        b.iter(|| {
            for base in &bases {
                let _ = inverse(black_box(base), None, &coarse);
            }
        })
    });

    group.bench_function("given", |b| {
        b.iter(|| {
            for base in &bases {
                let _ = inverse(black_box(base), Some(&pair), &options);
            }
        })
    });

    group.bench_function("helper", |b| {
        b.iter(|| chroma(black_box(&["#336699", "inverse", "hex"])))
    });

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
