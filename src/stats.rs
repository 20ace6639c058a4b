//! Statistics tracking for a savanna run.

use crate::grid::Grid;
use crate::world::TickReport;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Days per simulated year
pub const DAYS_PER_YEAR: u64 = 10;

/// Days per simulated century
pub const DAYS_PER_CENTURY: u64 = 1000;

/// Statistics snapshot for one day
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Days elapsed
    pub time: u64,
    pub erbast: usize,
    pub carviz: usize,
    /// Highest Erbast population seen so far
    pub erbast_peak: usize,
    /// Highest Carviz population seen so far
    pub carviz_peak: usize,
    /// Erbast eaten this day
    pub hunts: usize,
    /// Erbast eaten since the start of the run
    pub total_hunts: usize,
    /// Offspring born this day
    pub births: usize,
    /// Creatures that died this day, by aging, mass death or fights
    pub deaths: usize,
    pub ground_cells: usize,
    /// Mean vegetation density over Ground cells
    pub mean_density: f32,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats of a freshly generated grid, before any day has passed
    pub fn initial(grid: &Grid) -> Self {
        let mut stats = Self::new();
        stats.observe(grid);
        stats
    }

    /// Refresh population and vegetation figures from the grid and keep the peaks
    pub fn observe(&mut self, grid: &Grid) {
        self.erbast = grid.erbast_count();
        self.carviz = grid.carviz_count();
        self.erbast_peak = self.erbast_peak.max(self.erbast);
        self.carviz_peak = self.carviz_peak.max(self.carviz);
        self.ground_cells = grid.ground_count();
        self.mean_density = grid.mean_density();
    }

    /// Fold one day's events into the stats
    pub fn record_tick(&mut self, time: u64, report: &TickReport, grid: &Grid) {
        self.time = time;
        self.hunts = report.hunts;
        self.total_hunts += report.hunts;
        self.births = report.births;
        self.deaths = report.deaths + report.mass_deaths + report.fight_casualties;
        self.observe(grid);
    }

    /// Share of the initial Erbast still alive, 0 when none were seeded
    pub fn erbast_survival(&self, initial: usize) -> f32 {
        survival_rate(self.erbast, initial)
    }

    /// Share of the initial Carviz still alive, 0 when none were seeded
    pub fn carviz_survival(&self, initial: usize) -> f32 {
        survival_rate(self.carviz, initial)
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Erbast:{:5} (peak {:5}) | Carviz:{:5} (peak {:5}) | Hunts:{:6} | Veg:{:.1}",
            self.time,
            self.erbast,
            self.erbast_peak,
            self.carviz,
            self.carviz_peak,
            self.total_hunts,
            self.mean_density,
        )
    }
}

fn survival_rate(alive: usize, initial: usize) -> f32 {
    if initial == 0 {
        0.0
    } else {
        alive as f32 / initial as f32
    }
}

/// Elapsed days as "C Centuries, Y Years, M Months".
pub fn format_duration(days: u64) -> String {
    let centuries = days / DAYS_PER_CENTURY;
    let years = (days % DAYS_PER_CENTURY) / DAYS_PER_YEAR;
    let months = days % DAYS_PER_YEAR;
    format!("{} Centuries, {} Years, {} Months", centuries, years, months)
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    pub fn latest(&self) -> Option<&Stats> {
        self.snapshots.last()
    }

    /// Erbast and Carviz populations over time
    pub fn population_series(&self) -> Vec<(u64, usize, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.erbast, s.carviz))
            .collect()
    }

    /// Cumulative hunts over time
    pub fn hunt_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.total_hunts))
            .collect()
    }

    /// Mean vegetation density over time
    pub fn density_series(&self) -> Vec<(u64, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.mean_density))
            .collect()
    }

    /// Save history to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
