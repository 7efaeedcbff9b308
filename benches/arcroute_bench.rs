//! Criterion benchmarks for u-arcroute searches.
//!
//! Uses seeded generator graphs so runs are comparable across changes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_arcroute::graph::generator::{generate, GeneratedGraph, GeneratorConfig};
use u_arcroute::neighborhood::neighborhood;
use u_arcroute::route::RouteState;
use u_arcroute::tabu::{TabuConfig, TabuRunner};
use u_arcroute::vns::{VnsConfig, VnsRunner};

fn graph(nodes: usize) -> GeneratedGraph {
    generate(
        &GeneratorConfig::default()
            .with_nodes(nodes)
            .with_neighbors(4)
            .with_max_weight(10)
            .with_seed(42),
    )
    .expect("valid generator config")
}

// ===========================================================================
// Neighborhood expansion
// ===========================================================================

fn bench_neighborhood(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighborhood");

    let generated = graph(30);
    let root = RouteState::new(&generated.graph);
    for &radius in &[1, 2, 3, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
            b.iter(|| {
                let hood = neighborhood(black_box(&root), r, generated.minimal_range, false);
                black_box(hood.len())
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Full searches
// ===========================================================================

fn bench_tabu(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu");
    group.sample_size(10);

    for &n in &[10, 20, 40] {
        let generated = graph(n);
        let config = TabuConfig::new(generated.minimal_range).with_max_iterations(5_000);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(generated, config),
            |b, (g, c)| {
                b.iter(|| {
                    let result = TabuRunner::run(black_box(&g.graph), black_box(c));
                    black_box(result.map(|r| r.best_score))
                })
            },
        );
    }
    group.finish();
}

fn bench_vns(c: &mut Criterion) {
    let mut group = c.benchmark_group("vns");
    group.sample_size(10);

    for &n in &[10, 20] {
        let generated = graph(n);
        let config = VnsConfig::new(generated.minimal_range)
            .with_max_radius(3)
            .with_max_iterations(5_000);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(generated, config),
            |b, (g, c)| {
                b.iter(|| {
                    let result = VnsRunner::run(black_box(&g.graph), black_box(c));
                    black_box(result.map(|r| r.best_score))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_neighborhood, bench_tabu, bench_vns);
criterion_main!(benches);
