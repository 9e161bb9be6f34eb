//! Benchmarks for placement ranking and free-space queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stowage_core::{CancelToken, Dims, Item, OpenFace, PlacementMode, PlacementOptions};
use stowage_engine::Container;

fn half_filled_container() -> Container {
    let mut container =
        Container::new("BENCH", "Hold", Dims::new(12, 10, 6), OpenFace::Front).unwrap();
    for i in 0..10 {
        let item = Item::new(format!("SEED{i}"), "Seed Crate", Dims::new(3, 2, 2), 2.0);
        container
            .place_item(item, &PlacementOptions::new().with_mode(PlacementMode::FirstFit))
            .unwrap();
    }
    container
}

fn placement_benchmark(c: &mut Criterion) {
    let container = half_filled_container();

    c.bench_function("ranked_place_into_half_filled", |b| {
        b.iter(|| {
            let mut scratch = container.clone();
            let item = Item::new("PROBE", "Probe", Dims::new(2, 2, 2), 1.0);
            let placement = scratch.place_item(black_box(item), &PlacementOptions::default());
            black_box(placement)
        })
    });

    c.bench_function("largest_empty_box", |b| {
        let token = CancelToken::new();
        b.iter(|| {
            let found = container.find_largest_empty_box(black_box(&token));
            black_box(found)
        })
    });

    c.bench_function("fragmentation_analysis", |b| {
        let token = CancelToken::new();
        b.iter(|| {
            let report = container.fragmentation_analysis(black_box(&token));
            black_box(report)
        })
    });
}

criterion_group!(benches, placement_benchmark);
criterion_main!(benches);
