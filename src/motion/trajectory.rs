// src/motion/trajectory.rs
//! Open-loop reference trajectories for a single joint
//!
//! Both profiles move from `theta_start` to `theta_target` over the grid
//! duration. The cubic profile is the smoothstep polynomial, which starts and
//! stops with zero velocity.
use super::TimeGrid;

/// Open-loop interpolation profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Constant velocity from start to target
    Linear,

    /// Smoothstep `3s² - 2s³`
    Cubic,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 2] = [ProfileKind::Linear, ProfileKind::Cubic];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Linear => "Linear",
            ProfileKind::Cubic => "Cubic",
        }
    }

    /// Reference angle at time `t` of a move lasting `total_time`.
    pub fn angle_at(&self, theta_start: f64, theta_target: f64, t: f64, total_time: f64) -> f64 {
        match self {
            ProfileKind::Linear => linear_angle(theta_start, theta_target, t, total_time),
            ProfileKind::Cubic => cubic_angle(theta_start, theta_target, t, total_time),
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn linear_angle(theta_start: f64, theta_target: f64, t: f64, total_time: f64) -> f64 {
    theta_start + (theta_target - theta_start) * (t / total_time)
}

pub fn cubic_angle(theta_start: f64, theta_target: f64, t: f64, total_time: f64) -> f64 {
    let s = t / total_time;
    theta_start + (theta_target - theta_start) * (3.0 * s * s - 2.0 * s * s * s)
}

/// Angle samples aligned with the sample times they were produced for
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    angles: Vec<f64>,
}

impl Trajectory {
    /// Pair `angles` with the sample times of `grid`.
    ///
    /// Only the motion module builds trajectories, so the lengths always match.
    pub(crate) fn from_grid(grid: &TimeGrid, angles: Vec<f64>) -> Self {
        debug_assert_eq!(angles.len(), grid.num_steps());
        Self {
            times: grid.times(),
            angles,
        }
    }

    /// Sample an open-loop profile over the grid.
    pub fn generate(profile: ProfileKind, theta_start: f64, theta_target: f64, grid: &TimeGrid) -> Self {
        let total_time = grid.total_time();
        let angles = grid
            .times()
            .into_iter()
            .map(|t| profile.angle_at(theta_start, theta_target, t, total_time))
            .collect();
        Self::from_grid(grid, angles)
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Time/angle pairs in sample order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.angles.iter().copied())
    }

    pub fn last_angle(&self) -> Option<f64> {
        self.angles.last().copied()
    }
}
