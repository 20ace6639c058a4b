//! End-of-run persistence: every finished run is appended to a JSON array file.

use crate::config::Config;
use crate::stats::format_duration;
use crate::world::{EndReason, World};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("results io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("results json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inputs of a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub grid_size: usize,
    pub initial_erbast: usize,
    pub initial_carviz: usize,
    pub erbast_lifetime: u32,
    pub carviz_lifetime: u32,
    pub water_coverage: u32,
    pub seed: u64,
}

impl RunParameters {
    pub fn from_config(config: &Config, seed: u64) -> Self {
        Self {
            grid_size: config.world.grid_size,
            initial_erbast: config.erbast.initial_count,
            initial_carviz: config.carviz.initial_count,
            erbast_lifetime: config.erbast.lifetime,
            carviz_lifetime: config.carviz.lifetime,
            water_coverage: config.world.water_coverage,
            seed,
        }
    }
}

/// Aggregate outcome of a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub completed: bool,
    pub reason: Option<EndReason>,
    /// Elapsed days as "C Centuries, Y Years, M Months"
    pub duration: String,
    pub days: u64,
    pub max_erbast: usize,
    pub max_carviz: usize,
    pub total_hunts: usize,
    pub finished_at: DateTime<Utc>,
}

impl RunResults {
    /// Mean hunts per elapsed day, 0 for a run that never advanced
    pub fn hunts_per_day(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.total_hunts as f64 / self.days as f64
        }
    }
}

/// One persisted run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub parameters: RunParameters,
    pub results: RunResults,
}

impl RunRecord {
    /// Record the current state of `world`; `reason` is None for a run
    /// stopped before any end condition.
    pub fn from_world(world: &World, reason: Option<EndReason>) -> Self {
        Self {
            parameters: RunParameters::from_config(&world.config, world.seed()),
            results: RunResults {
                completed: reason.is_some(),
                reason,
                duration: format_duration(world.time),
                days: world.time,
                max_erbast: world.stats.erbast_peak,
                max_carviz: world.stats.carviz_peak,
                total_hunts: world.stats.total_hunts,
                finished_at: Utc::now(),
            },
        }
    }

    /// Multi-line report printed at the end of a run
    pub fn report(&self) -> String {
        let reason = self
            .results
            .reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Stopped early".to_string());
        format!(
            "Reason: {}\nDuration: {} ({} days)\nErbast peak: {}\nCarviz peak: {}\nTotal hunts: {}\nAverage hunts per day: {:.2}",
            reason,
            self.results.duration,
            self.results.days,
            self.results.max_erbast,
            self.results.max_carviz,
            self.results.total_hunts,
            self.results.hunts_per_day(),
        )
    }
}

/// JSON file holding every recorded run
pub struct ResultsStore {
    path: PathBuf,
}

impl ResultsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded runs. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<RunRecord>, ResultsError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Append `record` to the file. An unreadable file is replaced.
    pub fn append(&self, record: RunRecord) -> Result<usize, ResultsError> {
        let mut records = match self.load() {
            Ok(records) => records,
            Err(ResultsError::Json(err)) => {
                log::warn!(
                    "Unable to read existing results in {}, starting fresh: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        records.push(record);

        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(&self.path, json)?;
        log::info!("Saved run results to {}", self.path.display());
        Ok(records.len())
    }
}
