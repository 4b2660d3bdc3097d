// src/motion/mod.rs - Joint motion core: discretization, generators, PID loop, metrics, search

pub mod metrics;
pub mod pid;
pub mod search;
pub mod sweep;
pub mod time_grid;
pub mod trajectory;

pub use metrics::{Metrics, DEFAULT_SETTLE_TOLERANCE};
pub use pid::{PidGains, simulate};
pub use search::{CandidateResult, GainRange, SearchResult, search_gains};
pub use sweep::{SweepRecord, sweep_profiles};
pub use time_grid::TimeGrid;
pub use trajectory::{ProfileKind, Trajectory};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("Invalid time grid: {0}")]
    InvalidTimeGrid(String),
    #[error("Gain range for {0} is empty")]
    EmptyGainRange(&'static str),
    #[error("{0} must be finite, got {1}")]
    NonFiniteAngle(&'static str, f64),
    #[error("Settling tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}
