// Integration tests for open-loop generators, the PID loop and metric extraction

use joint_sim::motion::{self, Metrics, PidGains, ProfileKind, TimeGrid, Trajectory};
use joint_sim::MotionError;

fn reference_grid() -> TimeGrid {
    TimeGrid::new(2.0, 100).unwrap()
}

#[test]
fn test_open_loop_profiles_hit_both_endpoints() {
    for &(start, target) in &[(0.0, 90.0), (-20.0, 30.0), (45.0, -45.0)] {
        for &(total_time, steps) in &[(1.0, 50), (2.0, 100), (3.0, 200)] {
            let grid = TimeGrid::new(total_time, steps).unwrap();
            for profile in ProfileKind::ALL {
                let traj = Trajectory::generate(profile, start, target, &grid);
                assert_eq!(traj.angles()[0], start);
                assert!((traj.last_angle().unwrap() - target).abs() < 1e-9);
                assert_eq!(*traj.times().last().unwrap(), total_time);
            }
        }
    }
}

#[test]
fn test_zero_gains_never_move() {
    let traj = motion::simulate(0.0, 90.0, &PidGains::new(0.0, 0.0, 0.0), &reference_grid());
    assert!(traj.angles().iter().all(|&a| a == 0.0));
    let metrics = Metrics::from_trajectory(&traj, 90.0);
    assert_eq!(metrics.settling_time, None);
    assert_eq!(metrics.final_error, 90.0);
    assert_eq!(metrics.overshoot, -90.0);
}

#[test]
fn test_reference_scenario_is_reproducible() {
    let gains = PidGains::new(6.0, 1.2, 0.6);
    let first = motion::simulate(0.0, 90.0, &gains, &reference_grid());
    // Unrelated runs in between must not leak state
    let _ = motion::simulate(10.0, -10.0, &PidGains::new(50.0, 9.0, 3.0), &reference_grid());
    let second = motion::simulate(0.0, 90.0, &gains, &reference_grid());
    assert_eq!(first.len(), 100);
    for (a, b) in first.angles().iter().zip(second.angles()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_reference_scenario_metrics() {
    let gains = PidGains::new(6.0, 1.2, 0.6);
    let traj = motion::simulate(0.0, 90.0, &gains, &reference_grid());
    let metrics = Metrics::from_trajectory(&traj, 90.0);
    // Integral action carries the joint past the target and keeps it there
    assert!(metrics.overshoot > 3.0 && metrics.overshoot < 4.5);
    assert!(metrics.final_error < 0.0);
    let settling = metrics.settling_time.unwrap();
    assert!(settling > 0.5 && settling < 1.0);
}

#[test]
fn test_invalid_grids_fail_fast() {
    assert!(matches!(TimeGrid::new(2.0, 1), Err(MotionError::InvalidTimeGrid(_))));
    assert!(matches!(TimeGrid::new(0.0, 100), Err(MotionError::InvalidTimeGrid(_))));
}
