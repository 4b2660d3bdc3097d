//! CLI entry point for the simulation harness: profile sweeps, fixed-gain PID runs, gain search and comparison tables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use joint_sim::config::{self, Config};
use joint_sim::motion::{
    self, Metrics, PidGains, ProfileKind, TimeGrid, Trajectory, search::search_gains_with_tolerance,
    sweep::sweep_profiles_with_tolerance,
};
use joint_sim::report::{PidRunRecord, ReportWriter};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Simulation Harness CLI
#[derive(Parser, Debug)]
#[command(name = "sim-harness", about = "Joint motion simulation harness for trajectory comparison and PID tuning.")]
pub struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for CSV/JSONL results
    #[arg(short, long, default_value = "./results")]
    output: PathBuf,

    /// Also write per-sample JSONL for every trajectory table
    #[arg(long)]
    jsonl: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::Args)]
pub struct GainArgs {
    /// Proportional gain
    #[arg(long)]
    kp: f64,
    /// Integral gain
    #[arg(long)]
    ki: f64,
    /// Derivative gain
    #[arg(long)]
    kd: f64,
}

impl From<GainArgs> for PidGains {
    fn from(args: GainArgs) -> Self {
        PidGains::new(args.kp, args.ki, args.kd)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Linear vs cubic metrics over the configured time/step grid
    Sweep,
    /// Closed-loop run(s) with fixed gains
    Pid(GainArgs),
    /// Exhaustive gain search, compared against the open-loop profiles
    Tune,
    /// Linear vs cubic vs PID with the given gains.
    ///
    /// All three run on the `[search]` time grid (not a sweep grid), and the
    /// PID gains come from the command line rather than from an earlier
    /// `pid` run's metrics file.
    Compare(GainArgs),
}

struct Harness {
    config: Config,
    writer: ReportWriter,
    jsonl: bool,
}

impl Harness {
    fn theta(&self) -> (f64, f64) {
        (self.config.experiment.theta_start, self.config.experiment.theta_target)
    }

    fn tolerance(&self) -> f64 {
        self.config.experiment.settle_tolerance
    }

    fn measure(&self, trajectory: &Trajectory) -> Metrics {
        Metrics::with_tolerance(trajectory, self.config.experiment.theta_target, self.tolerance())
    }

    fn write_series(&self, name: &str, series: &[(&str, &Trajectory)]) -> Result<(), BoxError> {
        self.writer.trajectory_table(name, series)?;
        if self.jsonl {
            for (label, trajectory) in series {
                self.writer.trajectory_jsonl(&format!("{name}_{label}"), trajectory)?;
            }
        }
        Ok(())
    }

    fn sweep(&self) -> Result<(), BoxError> {
        let (start, target) = self.theta();
        let sweep = &self.config.sweep;
        let records = sweep_profiles_with_tolerance(start, target, &sweep.total_times, &sweep.num_steps, self.tolerance())?;
        for pair in records.chunks(ProfileKind::ALL.len()) {
            let first = &pair[0];
            let series: Vec<(&str, &Trajectory)> = pair.iter().map(|r| (r.profile.label(), &r.trajectory)).collect();
            self.write_series(&format!("motion_time{}_steps{}", first.total_time, first.num_steps), &series)?;
        }
        self.writer.sweep_metrics(&records)?;
        tracing::info!("Parameter sweep complete: {} records", records.len());
        Ok(())
    }

    fn pid(&self, gains: PidGains) -> Result<(), BoxError> {
        let (start, target) = self.theta();
        let mut runs = Vec::new();
        for &total_time in &self.config.pid.total_times {
            for &num_steps in &self.config.pid.num_steps {
                let grid = TimeGrid::new(total_time, num_steps)?;
                let trajectory = motion::simulate(start, target, &gains, &grid);
                let metrics = self.measure(&trajectory);
                log_metrics(&format!("PID ({gains})"), &metrics);
                let name = format!(
                    "pid_Kp{}_Ki{}_Kd{}_time{}_steps{}",
                    gains.kp, gains.ki, gains.kd, total_time, num_steps
                );
                self.write_series(&name, &[("PID", &trajectory)])?;
                runs.push(PidRunRecord { total_time, num_steps, gains, metrics });
            }
        }
        self.writer.pid_metrics(&runs)?;
        tracing::info!("PID simulation complete: {} runs", runs.len());
        Ok(())
    }

    fn tune(&self) -> Result<(), BoxError> {
        let (start, target) = self.theta();
        let grid = self.config.search.grid()?;
        let result = search_gains_with_tolerance(start, target, &grid, &self.config.search.ranges(), self.tolerance())?;
        self.writer.search_metrics(&result)?;

        tracing::info!("Optimal PID gains found: {}", result.best_gains);
        log_metrics("Optimal PID", &self.measure(&result.best_trajectory));

        let linear = Trajectory::generate(ProfileKind::Linear, start, target, &grid);
        let cubic = Trajectory::generate(ProfileKind::Cubic, start, target, &grid);
        self.write_series(
            "comparison_optimal_pid",
            &[("Linear", &linear), ("Cubic", &cubic), ("PID", &result.best_trajectory)],
        )
    }

    fn compare(&self, gains: PidGains) -> Result<(), BoxError> {
        let (start, target) = self.theta();
        let grid = self.config.search.grid()?;
        let linear = Trajectory::generate(ProfileKind::Linear, start, target, &grid);
        let cubic = Trajectory::generate(ProfileKind::Cubic, start, target, &grid);
        let pid = motion::simulate(start, target, &gains, &grid);
        for (label, trajectory) in [("Linear", &linear), ("Cubic", &cubic), ("PID", &pid)] {
            log_metrics(label, &self.measure(trajectory));
        }
        self.write_series(
            "comparison_linear_cubic_pid",
            &[("Linear", &linear), ("Cubic", &cubic), ("PID", &pid)],
        )
    }
}

fn log_metrics(label: &str, metrics: &Metrics) {
    match metrics.settling_time {
        Some(settling) => tracing::info!(
            "{} - Overshoot: {:.2}, Settling Time: {:.2}, Final Error: {:.2}",
            label, metrics.overshoot, settling, metrics.final_error
        ),
        None => tracing::warn!(
            "{} - Overshoot: {:.2}, Settling Time: not settled, Final Error: {:.2}",
            label, metrics.overshoot, metrics.final_error
        ),
    }
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    // 1. Load config (default or from file)
    let config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(&path).map_err(|e| {
                tracing::error!("Failed to load config from '{}': {}", path, e);
                Box::new(e) as BoxError
            })?
        }
        None => Config::default(),
    };

    // 2. Ensure output directories exist
    let writer = ReportWriter::new(&cli.output)?;
    let harness = Harness { config, writer, jsonl: cli.jsonl };

    // 3. Dispatch command
    let outcome = match cli.command {
        Commands::Sweep => harness.sweep(),
        Commands::Pid(gains) => harness.pid(gains.into()),
        Commands::Tune => harness.tune(),
        Commands::Compare(gains) => harness.compare(gains.into()),
    };
    if let Err(e) = &outcome {
        tracing::error!("Simulation failed: {}", e);
    }
    outcome
}
