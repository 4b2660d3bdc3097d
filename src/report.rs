// src/report.rs - CSV/JSONL output for simulation results
//
// Output layout under the report root:
//   data/metrics_sweep.csv
//   data/metrics_pid.csv
//   data/metrics_optimal_pid.csv
//   trajectories/<name>.csv   time column plus one column per series
//   trajectories/<name>.jsonl one record per sample

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::Writer;
use serde::Serialize;
use thiserror::Error;

use crate::motion::{Metrics, PidGains, SearchResult, SweepRecord, Trajectory};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Series '{0}' does not share the time samples of the first series")]
    Shape(String),
}

/// Result of one fixed-gain PID run, as reported in `metrics_pid.csv`
#[derive(Debug, Clone, Copy)]
pub struct PidRunRecord {
    pub total_time: f64,
    pub num_steps: usize,
    pub gains: PidGains,
    pub metrics: Metrics,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    #[serde(rename = "Total Time")]
    total_time: f64,
    #[serde(rename = "Num Steps")]
    num_steps: usize,
    #[serde(rename = "Method")]
    method: &'static str,
    #[serde(rename = "Overshoot")]
    overshoot: f64,
    #[serde(rename = "Settling Time")]
    settling_time: Option<f64>,
    #[serde(rename = "Final Error")]
    final_error: f64,
}

#[derive(Debug, Serialize)]
struct PidRow {
    #[serde(rename = "Total Time")]
    total_time: f64,
    #[serde(rename = "Num Steps")]
    num_steps: usize,
    #[serde(rename = "Kp")]
    kp: f64,
    #[serde(rename = "Ki")]
    ki: f64,
    #[serde(rename = "Kd")]
    kd: f64,
    #[serde(rename = "Overshoot")]
    overshoot: f64,
    #[serde(rename = "Settling Time")]
    settling_time: Option<f64>,
    #[serde(rename = "Final Error")]
    final_error: f64,
}

#[derive(Debug, Serialize)]
struct CandidateRow {
    #[serde(rename = "Kp")]
    kp: f64,
    #[serde(rename = "Ki")]
    ki: f64,
    #[serde(rename = "Kd")]
    kd: f64,
    #[serde(rename = "Overshoot")]
    overshoot: f64,
    #[serde(rename = "Settling Time")]
    settling_time: Option<f64>,
    #[serde(rename = "Final Error")]
    final_error: f64,
    #[serde(rename = "Cost")]
    cost: f64,
}

#[derive(Debug, Serialize)]
struct SampleRecord<'a> {
    series: &'a str,
    step: usize,
    time: f64,
    angle: f64,
}

pub fn write_sweep_csv<W: Write>(out: W, records: &[SweepRecord]) -> Result<(), ReportError> {
    let mut wtr = Writer::from_writer(out);
    for record in records {
        wtr.serialize(SweepRow {
            total_time: record.total_time,
            num_steps: record.num_steps,
            method: record.profile.label(),
            overshoot: record.metrics.overshoot,
            settling_time: record.metrics.settling_time,
            final_error: record.metrics.final_error,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_pid_csv<W: Write>(out: W, runs: &[PidRunRecord]) -> Result<(), ReportError> {
    let mut wtr = Writer::from_writer(out);
    for run in runs {
        wtr.serialize(PidRow {
            total_time: run.total_time,
            num_steps: run.num_steps,
            kp: run.gains.kp,
            ki: run.gains.ki,
            kd: run.gains.kd,
            overshoot: run.metrics.overshoot,
            settling_time: run.metrics.settling_time,
            final_error: run.metrics.final_error,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per evaluated combination, in search order.
pub fn write_search_csv<W: Write>(out: W, result: &SearchResult) -> Result<(), ReportError> {
    let mut wtr = Writer::from_writer(out);
    for candidate in &result.candidates {
        wtr.serialize(CandidateRow {
            kp: candidate.gains.kp,
            ki: candidate.gains.ki,
            kd: candidate.gains.kd,
            overshoot: candidate.metrics.overshoot,
            settling_time: candidate.metrics.settling_time,
            final_error: candidate.metrics.final_error,
            cost: candidate.cost,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Side-by-side table of trajectories that share the same time samples.
pub fn write_trajectory_csv<W: Write>(out: W, series: &[(&str, &Trajectory)]) -> Result<(), ReportError> {
    let Some((_, reference)) = series.first() else {
        return Ok(());
    };
    for (name, trajectory) in series {
        if trajectory.times() != reference.times() {
            return Err(ReportError::Shape(name.to_string()));
        }
    }

    let mut wtr = Writer::from_writer(out);
    let mut header = vec!["time".to_string()];
    header.extend(series.iter().map(|(name, _)| name.to_string()));
    wtr.write_record(&header)?;

    for (i, t) in reference.times().iter().enumerate() {
        let mut row = Vec::with_capacity(series.len() + 1);
        row.push(t.to_string());
        row.extend(series.iter().map(|(_, traj)| traj.angles()[i].to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trajectory_jsonl<W: Write>(mut out: W, name: &str, trajectory: &Trajectory) -> Result<(), ReportError> {
    for (step, (time, angle)) in trajectory.samples().enumerate() {
        let record = SampleRecord { series: name, step, time, angle };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes reports into `data/` and `trajectories/` below a root directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    /// Create the output directories if they don't exist.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ReportError> {
        let root = root.as_ref().to_path_buf();
        for dir in [root.join("data"), root.join("trajectories")] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                tracing::error!("Failed to create output directory {}: {}", dir.display(), e);
                ReportError::Io(e)
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.root.join("data").join(file_name)
    }

    pub fn trajectory_path(&self, file_name: &str) -> PathBuf {
        self.root.join("trajectories").join(file_name)
    }

    fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
        let file = File::create(path).map_err(|e| {
            tracing::error!("Failed to create {}: {}", path.display(), e);
            ReportError::Io(e)
        })?;
        Ok(BufWriter::new(file))
    }

    pub fn sweep_metrics(&self, records: &[SweepRecord]) -> Result<PathBuf, ReportError> {
        let path = self.data_path("metrics_sweep.csv");
        write_sweep_csv(Self::create(&path)?, records)?;
        tracing::info!("Sweep metrics saved to {}", path.display());
        Ok(path)
    }

    pub fn pid_metrics(&self, runs: &[PidRunRecord]) -> Result<PathBuf, ReportError> {
        let path = self.data_path("metrics_pid.csv");
        write_pid_csv(Self::create(&path)?, runs)?;
        tracing::info!("PID metrics saved to {}", path.display());
        Ok(path)
    }

    pub fn search_metrics(&self, result: &SearchResult) -> Result<PathBuf, ReportError> {
        let path = self.data_path("metrics_optimal_pid.csv");
        write_search_csv(Self::create(&path)?, result)?;
        tracing::info!("Gain search metrics saved to {}", path.display());
        Ok(path)
    }

    /// Write `trajectories/<name>.csv`.
    pub fn trajectory_table(&self, name: &str, series: &[(&str, &Trajectory)]) -> Result<PathBuf, ReportError> {
        let path = self.trajectory_path(&format!("{name}.csv"));
        write_trajectory_csv(Self::create(&path)?, series)?;
        tracing::debug!("Trajectory table saved to {}", path.display());
        Ok(path)
    }

    /// Write `trajectories/<name>.jsonl`.
    pub fn trajectory_jsonl(&self, name: &str, trajectory: &Trajectory) -> Result<PathBuf, ReportError> {
        let path = self.trajectory_path(&format!("{name}.jsonl"));
        write_trajectory_jsonl(Self::create(&path)?, name, trajectory)?;
        tracing::debug!("Trajectory samples saved to {}", path.display());
        Ok(path)
    }
}
