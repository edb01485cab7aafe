use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

const TIERS: [(&str, Coord2, f64); 3] = [
    ("classic", (15, 15), 0.2),
    ("wide", (64, 32), 0.15),
    ("huge", (255, 255), 0.05),
];

fn config(size: Coord2, bomb_probability: f64) -> GameConfig {
    GameConfig::new(size, GridGeometry::default(), bomb_probability)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, bomb_probability) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &size, |b, &size| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomMinefieldGenerator::new(seed)
                    .generate(black_box(config(size, bomb_probability)))
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_reveal");
    for (name, size, _) in TIERS {
        // no bombs, a single reveal opens the whole board
        let minefield = FixedLayoutGenerator::new([])
            .generate(config(size, 0.0))
            .unwrap();
        let engine = PlayEngine::new(minefield);
        group.bench_with_input(BenchmarkId::from_parameter(name), &engine, |b, engine| {
            b.iter(|| {
                let mut engine = engine.clone();
                engine.reveal(black_box((0, 0))).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood);
criterion_main!(benches);
