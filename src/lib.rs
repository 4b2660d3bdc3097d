// joint-sim: joint-motion trajectory simulation, metrics and PID gain search

pub mod config;
pub mod motion;
pub mod report;

pub use config::{Config, ConfigError, load_config};
pub use motion::{
    GainRange, Metrics, MotionError, PidGains, ProfileKind, SearchResult, TimeGrid, Trajectory,
};
