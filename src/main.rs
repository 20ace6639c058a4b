//! Savanna - CLI Entry Point
//!
//! Predator/prey ecosystem simulator.

use clap::{Parser, Subcommand};
use savanna::results::{RunRecord, ResultsStore};
use savanna::stats::StatsHistory;
use savanna::{benchmark, Config, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "savanna")]
#[command(version)]
#[command(about = "Grid-based predator/prey ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation until one species dies out or the day limit is hit
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Override the maximum number of days
        #[arg(short, long)]
        days: Option<u64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the stats history to this JSON file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the final map
        #[arg(long)]
        show_map: bool,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// List recorded runs
    Results {
        /// Results file
        #[arg(short, long, default_value = "results.json")]
        path: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of days
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Grid side length
        #[arg(short, long, default_value = "50")]
        grid_size: usize,
    },
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            days,
            seed,
            history,
            show_map,
            quiet,
        } => run_simulation(config, days, seed, history, show_map, quiet),

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }

        Commands::Results { path } => {
            init_logging("info");
            list_results(path)
        }

        Commands::Benchmark { steps, grid_size } => {
            init_logging("warn");
            run_benchmark(steps, grid_size)
        }
    }
}

fn run_simulation(
    config_path: PathBuf,
    days: Option<u64>,
    seed: Option<u64>,
    history: Option<PathBuf>,
    show_map: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        Config::default()
    };
    if let Some(days) = days {
        config.world.max_days = days;
    }
    config.validate()?;

    init_logging(if quiet { "warn" } else { config.logging.log_level.as_str() });
    if config_path.exists() {
        log::info!("Loaded config from {:?}", config_path);
    } else {
        log::info!("Using default configuration");
    }

    // Create world
    let mut world = match seed {
        Some(s) => World::new_with_seed(config.clone(), s),
        None => World::new(config.clone()),
    };

    log::info!(
        "Starting simulation: {}x{} grid, {} Erbast, {} Carviz, seed {}",
        config.world.grid_size,
        config.world.grid_size,
        world.erbast_count(),
        world.carviz_count(),
        world.seed()
    );

    let start = Instant::now();
    let reason = world.run_to_end();
    let elapsed = start.elapsed();

    let record = RunRecord::from_world(&world, Some(reason));

    println!();
    println!("=== Simulation Summary ===");
    println!("{}", record.report());
    println!(
        "Survival: Erbast {:.0}%, Carviz {:.0}%",
        100.0 * world.stats.erbast_survival(config.erbast.initial_count),
        100.0 * world.stats.carviz_survival(config.carviz.initial_count)
    );
    println!(
        "Speed: {:.1} days/s",
        world.time as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if show_map {
        println!();
        print!("{}", world.snapshot().render());
    }

    if let Some(path) = history {
        world.stats_history.save_json(&path)?;
        println!("Stats history: {:?}", path);
        if !quiet {
            print_history(&world.stats_history);
        }
    }

    let store = ResultsStore::new(&config.results.path);
    let total = store.append(record)?;
    println!("Results: {:?} ({} runs recorded)", store.path(), total);

    Ok(())
}

fn print_history(history: &StatsHistory) {
    println!();
    println!("{:>8} {:>8} {:>8} {:>8} {:>8}", "Day", "Erbast", "Carviz", "Hunts", "Veg");
    let series = history
        .population_series()
        .into_iter()
        .zip(history.hunt_series())
        .zip(history.density_series());
    for (((day, erbast, carviz), (_, hunts)), (_, density)) in series {
        println!("{:>8} {:>8} {:>8} {:>8} {:>8.1}", day, erbast, carviz, hunts, density);
    }
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn list_results(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = ResultsStore::new(&path);
    let records = store.load()?;

    println!("=== Recorded Runs ({}) ===", records.len());
    for (idx, record) in records.iter().enumerate() {
        let params = &record.parameters;
        let results = &record.results;
        let reason = results
            .reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Stopped early".to_string());
        println!(
            "{:3}. {} | grid {} | Erbast {} (peak {}) | Carviz {} (peak {}) | hunts {} | {}",
            idx + 1,
            results.finished_at.format("%Y-%m-%d %H:%M"),
            params.grid_size,
            params.initial_erbast,
            results.max_erbast,
            params.initial_carviz,
            results.max_carviz,
            results.total_hunts,
            reason,
        );
        println!("     {}", results.duration);
    }

    Ok(())
}

fn run_benchmark(steps: u64, grid_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Savanna Benchmark ===");
    println!("Days: {}", steps);
    println!("Grid: {}x{}", grid_size, grid_size);
    println!();

    let result = benchmark(steps, grid_size);
    println!("{}", result);

    Ok(())
}
