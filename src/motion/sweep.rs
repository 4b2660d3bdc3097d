// src/motion/sweep.rs - Open-loop profile comparison across discretizations
use super::metrics::DEFAULT_SETTLE_TOLERANCE;
use super::{Metrics, MotionError, ProfileKind, TimeGrid, Trajectory};

/// One profile measured on one grid
#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub total_time: f64,
    pub num_steps: usize,
    pub profile: ProfileKind,
    pub metrics: Metrics,
    pub trajectory: Trajectory,
}

/// Measure every open-loop profile on every `(total_time, num_steps)` pair.
///
/// Records come out grouped by grid, `total_times` outermost, with one record
/// per profile in [`ProfileKind::ALL`] order. Any invalid grid aborts the sweep.
pub fn sweep_profiles(
    theta_start: f64,
    theta_target: f64,
    total_times: &[f64],
    num_steps: &[usize],
) -> Result<Vec<SweepRecord>, MotionError> {
    sweep_profiles_with_tolerance(theta_start, theta_target, total_times, num_steps, DEFAULT_SETTLE_TOLERANCE)
}

pub fn sweep_profiles_with_tolerance(
    theta_start: f64,
    theta_target: f64,
    total_times: &[f64],
    num_steps: &[usize],
    tolerance: f64,
) -> Result<Vec<SweepRecord>, MotionError> {
    let mut records = Vec::with_capacity(total_times.len() * num_steps.len() * ProfileKind::ALL.len());
    for &total_time in total_times {
        for &steps in num_steps {
            let grid = TimeGrid::new(total_time, steps)?;
            for profile in ProfileKind::ALL {
                let trajectory = Trajectory::generate(profile, theta_start, theta_target, &grid);
                let metrics = Metrics::with_tolerance(&trajectory, theta_target, tolerance);
                tracing::debug!("{} T={} N={}: {:?}", profile, total_time, steps, metrics);
                records.push(SweepRecord {
                    total_time,
                    num_steps: steps,
                    profile,
                    metrics,
                    trajectory,
                });
            }
        }
    }
    tracing::info!("Profile sweep produced {} records", records.len());
    Ok(records)
}
