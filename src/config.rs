//! # Experiment Configuration
//!
//! Every section is optional; missing fields fall back to the reference
//! experiment (a 0 to 90 degree move).
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [experiment]
//! theta_start = 0.0
//! theta_target = 90.0
//! settle_tolerance = 1.0
//!
//! [sweep]
//! total_times = [1.0, 2.0, 3.0]
//! num_steps = [50, 100, 200]
//!
//! [pid]
//! total_times = [2.0]
//! num_steps = [100]
//!
//! [search]
//! total_time = 2.0
//! num_steps = 100
//! kp = [5.0, 6.0, 7.0]
//! ki = [1.0, 1.2, 1.5]
//! kd = [0.5, 0.6, 0.7]
//! ```

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::{GainRange, MotionError, TimeGrid};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] MotionError),
}

/// Top-level configuration for all harness commands.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub pid: PidRunConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Setpoint change shared by every command.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentConfig {
    #[serde(default = "default_theta_start")]
    pub theta_start: f64,
    #[serde(default = "default_theta_target")]
    pub theta_target: f64,
    #[serde(default = "default_settle_tolerance")]
    pub settle_tolerance: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            theta_start: default_theta_start(),
            theta_target: default_theta_target(),
            settle_tolerance: default_settle_tolerance(),
        }
    }
}

/// Grids for the open-loop profile sweep.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    #[serde(default = "default_sweep_times")]
    pub total_times: Vec<f64>,
    #[serde(default = "default_sweep_steps")]
    pub num_steps: Vec<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            total_times: default_sweep_times(),
            num_steps: default_sweep_steps(),
        }
    }
}

/// Grids for fixed-gain PID runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PidRunConfig {
    #[serde(default = "default_pid_times")]
    pub total_times: Vec<f64>,
    #[serde(default = "default_pid_steps")]
    pub num_steps: Vec<usize>,
}

impl Default for PidRunConfig {
    fn default() -> Self {
        Self {
            total_times: default_pid_times(),
            num_steps: default_pid_steps(),
        }
    }
}

/// Grid and gain ranges for the exhaustive gain search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_time")]
    pub total_time: f64,
    #[serde(default = "default_search_steps")]
    pub num_steps: usize,
    #[serde(default = "default_kp")]
    pub kp: Vec<f64>,
    #[serde(default = "default_ki")]
    pub ki: Vec<f64>,
    #[serde(default = "default_kd")]
    pub kd: Vec<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            total_time: default_search_time(),
            num_steps: default_search_steps(),
            kp: default_kp(),
            ki: default_ki(),
            kd: default_kd(),
        }
    }
}

impl SearchConfig {
    pub fn grid(&self) -> Result<TimeGrid, MotionError> {
        TimeGrid::new(self.total_time, self.num_steps)
    }

    pub fn ranges(&self) -> GainRange {
        GainRange::new(self.kp.clone(), self.ki.clone(), self.kd.clone())
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        if !self.theta_start.is_finite() {
            return Err(MotionError::NonFiniteAngle("theta_start", self.theta_start));
        }
        if !self.theta_target.is_finite() {
            return Err(MotionError::NonFiniteAngle("theta_target", self.theta_target));
        }
        if !self.settle_tolerance.is_finite() || self.settle_tolerance < 0.0 {
            return Err(MotionError::InvalidTolerance(self.settle_tolerance));
        }
        Ok(())
    }
}

impl Config {
    /// Check the setpoint, every grid and gain range before any simulation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.experiment.validate()?;
        for &total_time in &self.sweep.total_times {
            for &steps in &self.sweep.num_steps {
                TimeGrid::new(total_time, steps)?;
            }
        }
        for &total_time in &self.pid.total_times {
            for &steps in &self.pid.num_steps {
                TimeGrid::new(total_time, steps)?;
            }
        }
        self.search.grid()?;
        self.search.ranges().validate()?;
        Ok(())
    }
}

// Default value functions
fn default_theta_start() -> f64 { 0.0 }
fn default_theta_target() -> f64 { 90.0 }
fn default_settle_tolerance() -> f64 { crate::motion::DEFAULT_SETTLE_TOLERANCE }
fn default_sweep_times() -> Vec<f64> { vec![1.0, 2.0, 3.0] }
fn default_sweep_steps() -> Vec<usize> { vec![50, 100, 200] }
fn default_pid_times() -> Vec<f64> { vec![2.0] }
fn default_pid_steps() -> Vec<usize> { vec![100] }
fn default_search_time() -> f64 { 2.0 }
fn default_search_steps() -> usize { 100 }
fn default_kp() -> Vec<f64> { vec![5.0, 6.0, 7.0] }
fn default_ki() -> Vec<f64> { vec![1.0, 1.2, 1.5] }
fn default_kd() -> Vec<f64> { vec![0.5, 0.6, 0.7] }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("Failed to read config file '{}': {}", path, e);
        ConfigError::Io(e)
    })?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        tracing::error!("Failed to parse config TOML: {}", e);
        ConfigError::Toml(e)
    })?;
    config.validate()?;
    Ok(config)
}
