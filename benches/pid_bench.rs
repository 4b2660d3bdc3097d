// Benchmark for the closed-loop simulator and the exhaustive gain search
// Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use joint_sim::motion::{self, GainRange, PidGains, TimeGrid, search_gains};
use std::hint::black_box;

fn bench_pid_simulation(c: &mut Criterion) {
    let grid = TimeGrid::new(2.0, 10_000).unwrap();
    let gains = PidGains::new(6.0, 1.2, 0.6);
    c.bench_function("simulate 10k PID steps", |b| {
        b.iter(|| {
            let traj = motion::simulate(black_box(0.0), black_box(90.0), &gains, &grid);
            assert_eq!(traj.len(), 10_000);
        });
    });
}

fn bench_gain_search(c: &mut Criterion) {
    let grid = TimeGrid::new(2.0, 100).unwrap();
    let ranges = GainRange::new(
        (1..=10).map(|k| k as f64).collect(),
        vec![0.5, 1.0, 1.2, 1.5, 2.0],
        vec![0.1, 0.3, 0.5, 0.6, 0.7],
    );
    c.bench_function("search 250 gain combinations", |b| {
        b.iter(|| {
            let result = search_gains(0.0, 90.0, &grid, black_box(&ranges)).unwrap();
            assert_eq!(result.candidates.len(), 250);
        });
    });
}

criterion_group!(benches, bench_pid_simulation, bench_gain_search);
criterion_main!(benches);
