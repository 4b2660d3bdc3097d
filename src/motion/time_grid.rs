// src/motion/time_grid.rs
use super::MotionError;

/// Uniform discretization of a move over `[0, total_time]`.
///
/// Sample `i` sits at `i * total_time / (num_steps - 1)`, so the last sample
/// lands exactly on `total_time`. The integration step used by the closed-loop
/// simulator is `total_time / num_steps`, which is slightly shorter than the
/// sample spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    total_time: f64,
    num_steps: usize,
}

impl TimeGrid {
    /// Create a validated time grid.
    ///
    /// # Arguments
    /// * `total_time` - Move duration in seconds, finite and > 0
    /// * `num_steps` - Number of samples, at least 2
    pub fn new(total_time: f64, num_steps: usize) -> Result<Self, MotionError> {
        if num_steps < 2 {
            return Err(MotionError::InvalidTimeGrid(format!(
                "num_steps must be at least 2, got {num_steps}"
            )));
        }
        if !total_time.is_finite() || total_time <= 0.0 {
            return Err(MotionError::InvalidTimeGrid(format!(
                "total_time must be a positive finite number, got {total_time}"
            )));
        }
        Ok(Self { total_time, num_steps })
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Integration step for the closed-loop simulator.
    pub fn dt(&self) -> f64 {
        self.total_time / self.num_steps as f64
    }

    /// Time of sample `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        // Pin the last sample to total_time instead of trusting the division.
        if index + 1 == self.num_steps {
            return self.total_time;
        }
        let spacing = self.total_time / (self.num_steps - 1) as f64;
        index as f64 * spacing
    }

    /// All sample times in order.
    pub fn times(&self) -> Vec<f64> {
        (0..self.num_steps).map(|i| self.time_at(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_too_few_steps() {
        assert!(matches!(TimeGrid::new(2.0, 1), Err(MotionError::InvalidTimeGrid(_))));
        assert!(matches!(TimeGrid::new(2.0, 0), Err(MotionError::InvalidTimeGrid(_))));
    }

    #[test]
    fn test_rejects_bad_duration() {
        assert!(TimeGrid::new(0.0, 100).is_err());
        assert!(TimeGrid::new(-1.0, 100).is_err());
        assert!(TimeGrid::new(f64::NAN, 100).is_err());
        assert!(TimeGrid::new(f64::INFINITY, 100).is_err());
    }

    #[test]
    fn test_samples_span_full_duration() {
        let grid = TimeGrid::new(2.0, 100).unwrap();
        let times = grid.times();
        assert_eq!(times.len(), 100);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[99], 2.0);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_dt_uses_step_count_divisor() {
        let grid = TimeGrid::new(2.0, 100).unwrap();
        assert_eq!(grid.dt(), 0.02);
        // Sample spacing is 2/99, not dt
        assert!((grid.time_at(1) - 2.0 / 99.0).abs() < 1e-15);
    }

    #[test]
    fn test_two_sample_grid() {
        let grid = TimeGrid::new(1.0, 2).unwrap();
        assert_eq!(grid.times(), vec![0.0, 1.0]);
        assert_eq!(grid.dt(), 0.5);
    }
}
