//! World simulation engine - the daily tick and the run loop around it.

use crate::config::Config;
use crate::grid::{Cell, Coord, Grid};
use crate::herd::Herd;
use crate::pride::Pride;
use crate::snapshot::Snapshot;
use crate::stats::{Stats, StatsHistory};
use crate::terrain;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened during one tick. Informational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Erbast eaten by Carviz
    pub hunts: usize,
    /// Offspring produced by aging
    pub births: usize,
    /// Creatures removed by aging
    pub deaths: usize,
    /// Creatures removed by mass local extinction
    pub mass_deaths: usize,
    /// Cells where at least two sub-prides met
    pub fights: usize,
    /// Carviz removed by fights
    pub fight_casualties: usize,
    /// Creatures that changed cell
    pub moves: usize,
}

/// Advance the grid by one day.
///
/// Six phases run over the whole grid in row-major order, each finishing
/// before the next starts:
/// 1. vegetation growth on every Ground cell
/// 2. mass-death check on every occupied cell
/// 3. movement decisions, herd then pride on each cell
/// 4. pride fights
/// 5. grazing, then hunting on cells that still hold Erbast
/// 6. aging and reproduction
pub fn advance_tick<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();
    let coords: Vec<Coord> = grid.coords().collect();

    // Phase 1: growth
    for cell in grid.cells_mut() {
        if let Some(vegetob) = cell.vegetob.as_mut() {
            vegetob.grow();
        }
    }

    // Phase 2: mass death
    for &at in &coords {
        if grid.cell(at).is_occupied() {
            report.mass_deaths += grid.mass_death_check(at);
        }
    }

    // Phase 3: movement
    grid.reset_moved_flags();
    for &at in &coords {
        if !grid.cell(at).herd.is_empty() {
            report.moves += Herd::decide(grid, at, rng);
        }
        if !grid.cell(at).pride.is_empty() {
            report.moves += Pride::decide(grid, at, rng);
        }
    }

    // Phase 4: fights
    for cell in grid.cells_mut() {
        if cell.pride.is_empty() {
            continue;
        }
        let outcome = cell.pride.resolve_fight(rng);
        if outcome.contested() {
            report.fights += 1;
            report.fight_casualties += outcome.casualties;
        }
    }

    // Phase 5: feeding
    for cell in grid.cells_mut() {
        let Cell {
            herd,
            pride,
            vegetob,
            ..
        } = cell;
        if !herd.is_empty() {
            if let Some(vegetob) = vegetob {
                herd.graze(vegetob);
            }
        }
        for idx in 0..pride.len() {
            if herd.is_empty() {
                break;
            }
            if let Some(carviz) = pride.get_mut(idx) {
                if carviz.hunt(herd).is_some() {
                    report.hunts += 1;
                }
            }
        }
    }

    // Phase 6: aging
    for cell in grid.cells_mut() {
        for aging in [cell.herd.age(), cell.pride.age()] {
            report.births += aging.births;
            report.deaths += aging.deaths;
        }
    }

    report
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    BothExtinct,
    CarvizExtinct,
    ErbastExtinct,
    MaxDaysReached,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::BothExtinct => "Both species are extinct",
            EndReason::CarvizExtinct => "Carviz are extinct",
            EndReason::ErbastExtinct => "Erbasts are extinct",
            EndReason::MaxDaysReached => "Maximum simulation days reached",
        };
        f.write_str(text)
    }
}

/// The simulated savanna and the run state around it
pub struct World {
    pub grid: Grid,

    // State
    pub time: u64,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,
    pub last_report: TickReport,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = terrain::build(&config, &mut rng);
        let stats = Stats::initial(&grid);
        let mut stats_history = StatsHistory::new(config.logging.stats_interval);
        stats_history.record(stats.clone());

        Self {
            grid,
            time: 0,
            config,
            stats,
            stats_history,
            last_report: TickReport::default(),
            rng,
            seed,
        }
    }

    /// Wrap an existing grid, for hand-built scenarios
    pub fn from_grid(config: Config, grid: Grid, seed: u64) -> Self {
        let stats = Stats::initial(&grid);
        let stats_history = StatsHistory::new(config.logging.stats_interval);
        Self {
            grid,
            time: 0,
            config,
            stats,
            stats_history,
            last_report: TickReport::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Main simulation step
    pub fn step(&mut self) {
        let report = advance_tick(&mut self.grid, &mut self.rng);
        self.time += 1;
        self.last_report = report;
        self.stats.record_tick(self.time, &report, &self.grid);

        log::debug!(
            "day {}: {} hunts, {} births, {} deaths, {} mass deaths, {} fights",
            self.time,
            report.hunts,
            report.births,
            report.deaths,
            report.mass_deaths,
            report.fights
        );

        if self.time % self.config.logging.stats_interval.max(1) == 0 {
            self.stats_history.record(self.stats.clone());
            log::info!("{}", self.stats.summary());
        }
    }

    /// Run simulation for specified number of steps
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Step until an end condition holds and return it
    pub fn run_to_end(&mut self) -> EndReason {
        loop {
            if let Some(reason) = self.end_reason() {
                log::info!("Run ended on day {}: {}", self.time, reason);
                return reason;
            }
            self.step();
        }
    }

    /// End condition of the current state, if any. Extinction takes
    /// precedence over the day limit.
    pub fn end_reason(&self) -> Option<EndReason> {
        let erbast = self.erbast_count();
        let carviz = self.carviz_count();
        if erbast == 0 && carviz == 0 {
            Some(EndReason::BothExtinct)
        } else if carviz == 0 {
            Some(EndReason::CarvizExtinct)
        } else if erbast == 0 {
            Some(EndReason::ErbastExtinct)
        } else if self.time >= self.config.world.max_days {
            Some(EndReason::MaxDaysReached)
        } else {
            None
        }
    }

    pub fn erbast_count(&self) -> usize {
        self.stats.erbast
    }

    pub fn carviz_count(&self) -> usize {
        self.stats.carviz
    }

    /// Get current population count
    pub fn population(&self) -> usize {
        self.erbast_count() + self.carviz_count()
    }

    /// Render codes of the current grid
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_grid(&self.grid)
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
