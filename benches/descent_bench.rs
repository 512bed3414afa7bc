//! Criterion benchmarks for u-tour-search descents.
//!
//! Uses synthetic uniform instances to compare incremental descent against
//! rebuilding the move cache after every accepted move, in both
//! neighborhood modes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tour_search::construction::{InitialTour, RandomTour};
use u_tour_search::descent::{DescentConfig, DescentRunner, GreedyDescent};
use u_tour_search::model::{Instance, Node, Tour};
use u_tour_search::neighborhood::Neighborhood;

// ===========================================================================
// Instances
// ===========================================================================

fn uniform(n: usize, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes: Vec<Node> = (0..n)
        .map(|_| {
            Node::new(
                rng.random_range(0.0..4000.0),
                rng.random_range(0.0..2000.0),
                rng.random_range(0..2000),
            )
        })
        .collect();
    Instance::from_nodes(&nodes).unwrap()
}

fn start(instance: &Instance) -> Tour {
    RandomTour
        .initial_tour(instance, 0, &mut StdRng::seed_from_u64(42))
        .unwrap()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_steepest(c: &mut Criterion) {
    let mut group = c.benchmark_group("steepest_descent");
    group.sample_size(10);

    for &n in &[100usize, 200] {
        let instance = uniform(n, 7);
        let tour = start(&instance);
        let neighborhoods = [
            ("exhaustive", Neighborhood::exhaustive()),
            ("candidates10", Neighborhood::with_candidates(&instance, 10)),
        ];
        for (label, nh) in &neighborhoods {
            for (mode, interval) in [("incremental", 25usize), ("rebuild", 1)] {
                let config = DescentConfig::default().with_rebuild_interval(interval);
                group.bench_with_input(
                    BenchmarkId::new(format!("{label}_{mode}"), n),
                    &(&instance, nh, &tour, config),
                    |b, (inst, nh, tour, config)| {
                        b.iter(|| {
                            let result = DescentRunner::run(
                                black_box(inst),
                                black_box(nh),
                                (*tour).clone(),
                                config,
                            );
                            black_box(result)
                        })
                    },
                );
            }
        }
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_descent");
    group.sample_size(10);

    for &n in &[100usize, 200] {
        let instance = uniform(n, 7);
        let tour = start(&instance);
        let nh = Neighborhood::exhaustive();
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(&instance, &nh, &tour),
            |b, (inst, nh, tour)| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(1);
                    let result = GreedyDescent::run(
                        black_box(inst),
                        black_box(nh),
                        (*tour).clone(),
                        &DescentConfig::default(),
                        &mut rng,
                    );
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_candidate_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_lists");
    group.sample_size(10);

    for &n in &[200usize, 1000] {
        let instance = uniform(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| black_box(Neighborhood::with_candidates(black_box(inst), 10)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_steepest, bench_greedy, bench_candidate_lists);
criterion_main!(benches);
