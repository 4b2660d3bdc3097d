// src/motion/search.rs
//! Exhaustive PID gain search
//!
//! Every `(kp, ki, kd)` combination is simulated and scored with
//! [`Metrics::cost`]. Combinations are enumerated with `kp` outermost and `kd`
//! innermost, and a candidate only replaces the current best when its cost is
//! strictly lower, so the first of several equal costs wins.
use super::metrics::DEFAULT_SETTLE_TOLERANCE;
use super::{Metrics, MotionError, PidGains, TimeGrid, Trajectory, pid};

/// Candidate values for each gain
#[derive(Debug, Clone, PartialEq)]
pub struct GainRange {
    pub kp: Vec<f64>,
    pub ki: Vec<f64>,
    pub kd: Vec<f64>,
}

impl Default for GainRange {
    fn default() -> Self {
        Self {
            kp: vec![5.0, 6.0, 7.0],
            ki: vec![1.0, 1.2, 1.5],
            kd: vec![0.5, 0.6, 0.7],
        }
    }
}

impl GainRange {
    pub fn new(kp: Vec<f64>, ki: Vec<f64>, kd: Vec<f64>) -> Self {
        Self { kp, ki, kd }
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        if self.kp.is_empty() {
            return Err(MotionError::EmptyGainRange("kp"));
        }
        if self.ki.is_empty() {
            return Err(MotionError::EmptyGainRange("ki"));
        }
        if self.kd.is_empty() {
            return Err(MotionError::EmptyGainRange("kd"));
        }
        Ok(())
    }

    /// Number of combinations in the grid.
    pub fn len(&self) -> usize {
        self.kp.len() * self.ki.len() * self.kd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cartesian product in enumeration order.
    pub fn combinations(&self) -> impl Iterator<Item = PidGains> + '_ {
        self.kp.iter().flat_map(move |&kp| {
            self.ki.iter().flat_map(move |&ki| {
                self.kd.iter().map(move |&kd| PidGains::new(kp, ki, kd))
            })
        })
    }
}

/// Score of one evaluated combination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateResult {
    pub gains: PidGains,
    pub metrics: Metrics,
    pub cost: f64,
}

/// Outcome of a gain search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_gains: PidGains,
    pub best_trajectory: Trajectory,
    pub best_cost: f64,
    /// Every combination, in enumeration order
    pub candidates: Vec<CandidateResult>,
}

impl SearchResult {
    pub fn best_metrics(&self, target: f64) -> Metrics {
        Metrics::from_trajectory(&self.best_trajectory, target)
    }
}

/// Search `ranges` with the default settling band.
pub fn search_gains(
    theta_start: f64,
    theta_target: f64,
    grid: &TimeGrid,
    ranges: &GainRange,
) -> Result<SearchResult, MotionError> {
    search_gains_with_tolerance(theta_start, theta_target, grid, ranges, DEFAULT_SETTLE_TOLERANCE)
}

/// Search `ranges`, scoring settling time against a `tolerance` band.
///
/// If no combination settles, the first one enumerated is returned with an
/// infinite cost.
pub fn search_gains_with_tolerance(
    theta_start: f64,
    theta_target: f64,
    grid: &TimeGrid,
    ranges: &GainRange,
    tolerance: f64,
) -> Result<SearchResult, MotionError> {
    ranges.validate()?;
    tracing::info!(
        "Searching {} gain combinations over {}s / {} steps",
        ranges.len(),
        grid.total_time(),
        grid.num_steps()
    );

    let evaluate = |gains: PidGains| {
        let trajectory = pid::simulate(theta_start, theta_target, &gains, grid);
        let metrics = Metrics::with_tolerance(&trajectory, theta_target, tolerance);
        let cost = metrics.cost();
        tracing::debug!("{}: {:?}, cost={}", gains, metrics, cost);
        if !metrics.is_settled() {
            tracing::warn!("{} never settled within {} degrees", gains, tolerance);
        }
        (CandidateResult { gains, metrics, cost }, trajectory)
    };

    let mut combinations = ranges.combinations();
    // validate() guarantees at least one combination
    let Some(first) = combinations.next() else {
        unreachable!("validated gain ranges are non-empty");
    };

    // The first combination seeds the best, later ones must be strictly cheaper
    let (seed, mut best_trajectory) = evaluate(first);
    let mut best_gains = seed.gains;
    let mut best_cost = seed.cost;
    let mut candidates = Vec::with_capacity(ranges.len());
    candidates.push(seed);

    for gains in combinations {
        let (candidate, trajectory) = evaluate(gains);
        if candidate.cost < best_cost {
            best_gains = candidate.gains;
            best_cost = candidate.cost;
            best_trajectory = trajectory;
        }
        candidates.push(candidate);
    }

    tracing::info!("Best gains {} with cost {:.4}", best_gains, best_cost);

    Ok(SearchResult {
        best_gains,
        best_trajectory,
        best_cost,
        candidates,
    })
}
