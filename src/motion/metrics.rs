// src/motion/metrics.rs
use super::Trajectory;

/// Settling band half-width, in the angle unit (degrees).
pub const DEFAULT_SETTLE_TOLERANCE: f64 = 1.0;

/// Tracking performance of a completed trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// `max(trajectory) - target`; negative if the target is never exceeded.
    ///
    /// NaN samples are skipped when taking the peak, so a run that diverges
    /// through `inf` to NaN reports `+inf` here rather than NaN. `final_error`
    /// still carries the NaN of the last sample.
    pub overshoot: f64,

    /// Time of the first sample inside the settling band, `None` if never
    pub settling_time: Option<f64>,

    /// `target - trajectory[last]`
    pub final_error: f64,
}

impl Metrics {
    /// Measure `trajectory` against `target` with the default 1 degree band.
    pub fn from_trajectory(trajectory: &Trajectory, target: f64) -> Self {
        Self::with_tolerance(trajectory, target, DEFAULT_SETTLE_TOLERANCE)
    }

    /// Measure `trajectory` against `target` with a custom settling band.
    pub fn with_tolerance(trajectory: &Trajectory, target: f64, tolerance: f64) -> Self {
        let peak = trajectory
            .angles()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let last = trajectory.last_angle().unwrap_or(f64::NAN);
        let settling_time = trajectory
            .samples()
            .find(|&(_, angle)| (angle - target).abs() <= tolerance)
            .map(|(t, _)| t);

        Self {
            overshoot: peak - target,
            settling_time,
            final_error: target - last,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settling_time.is_some()
    }

    /// Ranking cost `settling_time + overshoot + |final_error|`, lower is better.
    ///
    /// Unsettled runs cost `+inf`. A diverged run whose sum is NaN is also
    /// reported as `+inf` so costs always compare.
    pub fn cost(&self) -> f64 {
        let Some(settling_time) = self.settling_time else {
            return f64::INFINITY;
        };
        let cost = settling_time + self.overshoot + self.final_error.abs();
        if cost.is_nan() { f64::INFINITY } else { cost }
    }
}
