// src/motion/pid.rs
//! Discrete-time closed-loop joint simulation
//!
//! The joint angle is driven directly by the PID output and advanced with
//! forward Euler integration. There is no anti-windup, no output clamping and
//! no derivative filtering, so unstable gains are free to diverge.
use super::{TimeGrid, Trajectory};

/// Controller gains
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

impl std::fmt::Display for PidGains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kp={}, Ki={}, Kd={}", self.kp, self.ki, self.kd)
    }
}

/// Running accumulators for a single simulation
#[derive(Debug, Clone)]
struct PidState {
    integral: f64,
    prev_error: f64,
}

impl PidState {
    /// The derivative at the first step is taken against the initial error, not zero.
    fn new(theta_start: f64, theta_target: f64) -> Self {
        Self {
            integral: 0.0,
            prev_error: theta_target - theta_start,
        }
    }

    /// Control effort for one step.
    fn update(&mut self, gains: &PidGains, error: f64, dt: f64) -> f64 {
        self.integral += error * dt;
        let derivative = (error - self.prev_error) / dt;
        let control = gains.kp * error + gains.ki * self.integral + gains.kd * derivative;
        self.prev_error = error;
        control
    }
}

/// Simulate the closed loop over `grid`, starting at `theta_start`.
///
/// # Arguments
/// * `theta_start` - Initial joint angle (degrees)
/// * `theta_target` - Setpoint (degrees)
/// * `gains` - PID gains
/// * `grid` - Time discretization; the Euler step is `grid.dt()`
///
/// # Returns
/// * `Trajectory` - One angle per grid sample, the first being `theta_start`
pub fn simulate(theta_start: f64, theta_target: f64, gains: &PidGains, grid: &TimeGrid) -> Trajectory {
    let dt = grid.dt();
    let mut state = PidState::new(theta_start, theta_target);
    let mut angles = Vec::with_capacity(grid.num_steps());
    angles.push(theta_start);

    let mut theta = theta_start;
    for _ in 1..grid.num_steps() {
        let error = theta_target - theta;
        let control = state.update(gains, error, dt);
        theta += control * dt;
        angles.push(theta);
    }

    if !theta.is_finite() {
        tracing::warn!("PID simulation diverged ({}): final angle {}", gains, theta);
    }

    Trajectory::from_grid(grid, angles)
}
