// Integration tests for the exhaustive PID gain search

use joint_sim::motion::{self, GainRange, Metrics, PidGains, TimeGrid, search_gains};
use joint_sim::MotionError;

fn reference_grid() -> TimeGrid {
    TimeGrid::new(2.0, 100).unwrap()
}

#[test]
fn test_reference_grid_search() {
    let result = search_gains(0.0, 90.0, &reference_grid(), &GainRange::default()).unwrap();
    assert_eq!(result.candidates.len(), 27);
    assert_eq!(result.best_gains, PidGains::new(7.0, 1.0, 0.5));
    assert!((result.best_cost - 5.2858).abs() < 1e-3);

    let min = result
        .candidates
        .iter()
        .map(|c| c.cost)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(result.best_cost, min);
}

#[test]
fn test_best_trajectory_matches_direct_simulation() {
    let result = search_gains(0.0, 90.0, &reference_grid(), &GainRange::default()).unwrap();
    let direct = motion::simulate(0.0, 90.0, &result.best_gains, &reference_grid());
    assert_eq!(result.best_trajectory, direct);
    assert_eq!(result.best_metrics(90.0), Metrics::from_trajectory(&direct, 90.0));
}

#[test]
fn test_single_combination() {
    let ranges = GainRange::new(vec![5.0], vec![1.0], vec![0.5]);
    let result = search_gains(0.0, 90.0, &reference_grid(), &ranges).unwrap();
    assert_eq!(result.best_gains, PidGains::new(5.0, 1.0, 0.5));

    let traj = motion::simulate(0.0, 90.0, &result.best_gains, &reference_grid());
    let metrics = Metrics::from_trajectory(&traj, 90.0);
    let expected = metrics.settling_time.unwrap() + metrics.overshoot + metrics.final_error.abs();
    assert_eq!(result.best_cost, expected);
}

#[test]
fn test_divergent_candidates_are_ranked_not_fatal() {
    let ranges = GainRange::new(vec![500.0, 6.0], vec![1.2], vec![0.6]);
    let result = search_gains(0.0, 90.0, &reference_grid(), &ranges).unwrap();
    assert_eq!(result.best_gains, PidGains::new(6.0, 1.2, 0.6));
    assert!(result.candidates[0].cost > result.best_cost);
}

#[test]
fn test_empty_ranges_are_errors() {
    let ranges = GainRange::new(vec![], vec![1.0], vec![0.5]);
    let err = search_gains(0.0, 90.0, &reference_grid(), &ranges).unwrap_err();
    assert_eq!(err, MotionError::EmptyGainRange("kp"));
}
