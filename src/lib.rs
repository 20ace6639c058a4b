//! # Savanna
//!
//! Grid-based predator/prey ecosystem simulator. Erbast graze vegetation,
//! Carviz hunt Erbast, and both move, fight, age and reproduce on a square
//! grid of Ground and Water cells, one day per tick.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use savanna::{Config, World};
//!
//! let mut world = World::new(Config::default());
//! let reason = world.run_to_end();
//!
//! println!("{} after {} days", reason, world.time);
//! println!("Hunts: {}", world.stats.total_hunts);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use savanna::Config;
//!
//! let mut config = Config::default();
//! config.world.grid_size = 30;
//! config.carviz.initial_count = 4;
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Single ticks
//!
//! ```rust
//! use savanna::creature::Species;
//! use savanna::grid::Grid;
//! use savanna::world::advance_tick;
//! use rand::SeedableRng;
//!
//! let mut grid = Grid::uniform(5, 40);
//! grid.place(Species::Erbast, (2, 2), 10, 60);
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//!
//! let report = advance_tick(&mut grid, &mut rng);
//! assert_eq!(report.hunts, 0);
//! ```

pub mod config;
pub mod constants;
pub mod creature;
pub mod grid;
pub mod group;
pub mod herd;
pub mod pride;
pub mod results;
pub mod snapshot;
pub mod stats;
pub mod terrain;
pub mod world;

// Re-export main types
pub use config::Config;
pub use creature::{Carviz, Erbast, Species};
pub use grid::Grid;
pub use world::{advance_tick, EndReason, TickReport, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(steps: u64, grid_size: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.world.grid_size = grid_size;

    let mut world = World::new(config);
    let initial_population = world.population();

    let start = Instant::now();
    world.run(steps);
    let elapsed = start.elapsed();

    BenchmarkResult {
        steps,
        grid_size,
        initial_population,
        final_population: world.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        total_hunts: world.stats.total_hunts,
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub grid_size: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
    pub total_hunts: usize,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "Population: {} -> {}", self.initial_population, self.final_population)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        writeln!(f, "Hunts: {}", self.total_hunts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut config = Config::default();
        config.world.grid_size = 20;
        let mut world = World::new(config);

        world.run(100);

        assert_eq!(world.time, 100);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(50, 20);

        assert_eq!(result.steps, 50);
        assert!(result.steps_per_second > 0.0);
        assert!(result.to_string().contains("Grid: 20x20"));
    }
}
