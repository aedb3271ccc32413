/*
 * Boid Simulation Benchmark
 *
 * Measures the cost of rule evaluation on its own and of a full tick,
 * for flocks from 100 up to the population cap, with rule evaluation run
 * both sequentially and on the rayon pool.
 */

use boids3d::physics::evaluate_contributions;
use boids3d::{AnchorSet, RuleSet, Simulation, SimulationParams, SpawnConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

const SIZES: [usize; 4] = [100, 500, 1000, 2000];

fn spawn(n: usize) -> Simulation {
    Simulation::spawn(&SpawnConfig::with_population(n), AnchorSet::default()).unwrap()
}

// Benchmark the rule contributions for every boid
fn bench_contributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("contributions");
    let rules = RuleSet::default();

    for &n in SIZES.iter() {
        let simulation = spawn(n);
        for parallel in [false, true] {
            let params = SimulationParams {
                parallel,
                ..SimulationParams::default()
            };
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                let mut out = Vec::with_capacity(n);
                b.iter(|| {
                    evaluate_contributions(&simulation.flock().snapshot(), &rules, &params, &mut out);
                    black_box(&out);
                });
            });
        }
    }

    group.finish();
}

// Benchmark the whole tick, including commit and trail updates
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    let params = SimulationParams::default();

    for &n in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut simulation = spawn(n);
            b.iter(|| {
                simulation.tick(black_box(&params));
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_contributions, bench_tick
}

criterion_main!(benches);
