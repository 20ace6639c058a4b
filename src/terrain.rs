//! World generation: water bodies, initial vegetation and creature seeding.

use crate::config::{Config, WorldConfig};
use crate::constants::{INITIAL_DENSITY_RANGE, INITIAL_ENERGY_RANGE};
use crate::creature::Species;
use crate::grid::{neighbor_kernel, Cell, Coord, Grid};
use rand::prelude::*;
use std::collections::HashSet;

/// Chance that a flood-fill step pushes each neighbor onto the frontier
const WATER_SPREAD_CHANCE: f64 = 0.7;

/// Number of separate water bodies carved per world
const WATER_BODIES: std::ops::RangeInclusive<usize> = 2..=4;

/// Build a grid from the world configuration: water bodies first, then
/// Ground with a random vegetation density on every remaining cell.
pub fn generate<R: Rng + ?Sized>(world: &WorldConfig, rng: &mut R) -> Grid {
    let water = water_map(world.grid_size, world.water_coverage, rng);
    Grid::from_fn(world.grid_size, |row, column| {
        if water.contains(&(row, column)) {
            Cell::water(row, column)
        } else {
            Cell::ground(row, column, rng.gen_range(INITIAL_DENSITY_RANGE))
        }
    })
}

/// Generate a grid and seed both species as configured.
pub fn build<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Grid {
    let mut grid = generate(&config.world, rng);
    let carviz = populate(
        &mut grid,
        Species::Carviz,
        config.carviz.initial_count,
        config.carviz.lifetime,
        rng,
    );
    let erbast = populate(
        &mut grid,
        Species::Erbast,
        config.erbast.initial_count,
        config.erbast.lifetime,
        rng,
    );
    log::debug!(
        "Seeded {} Erbast and {} Carviz on {} ground cells",
        erbast,
        carviz,
        grid.ground_count()
    );
    grid
}

/// Cells covered by water for a grid of `size` with `coverage` percent water
pub fn water_map<R: Rng + ?Sized>(size: usize, coverage: u32, rng: &mut R) -> HashSet<Coord> {
    let total = size * size;
    let water_cells = total * coverage as usize / 100;
    let mut water = HashSet::with_capacity(water_cells);
    if water_cells == 0 {
        return water;
    }

    let bodies = rng.gen_range(WATER_BODIES);
    for body in body_sizes(water_cells, bodies, rng) {
        let center = (rng.gen_range(0..size), rng.gen_range(0..size));
        flood_fill(&mut water, center, body, size, rng);
    }
    water
}

/// Split `water_cells` among `bodies` random sizes, rescaled to the total.
fn body_sizes<R: Rng + ?Sized>(water_cells: usize, bodies: usize, rng: &mut R) -> Vec<usize> {
    let upper = (water_cells / bodies).max(1);
    let raw: Vec<usize> = (0..bodies).map(|_| rng.gen_range(1..=upper)).collect();
    let sum: usize = raw.iter().sum();
    raw.into_iter().map(|s| s * water_cells / sum).collect()
}

/// Grow one water body from `center` by randomized flood fill.
fn flood_fill<R: Rng + ?Sized>(
    water: &mut HashSet<Coord>,
    center: Coord,
    target: usize,
    size: usize,
    rng: &mut R,
) {
    let mut frontier = vec![center];
    // Overlap with an earlier body still counts toward this one
    let mut body = HashSet::with_capacity(target);

    while body.len() < target && !frontier.is_empty() {
        let at = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        if !body.insert(at) {
            continue;
        }
        water.insert(at);
        for next in neighbor_kernel(at, size) {
            if rng.gen_bool(WATER_SPREAD_CHANCE) {
                frontier.push(next);
            }
        }
    }
}

/// Place `count` creatures of `species` on random Ground cells with energy
/// drawn from the initial range. Erbast only go to cells without a herd.
///
/// Returns how many were placed; stops early when no eligible cell remains.
pub fn populate<R: Rng + ?Sized>(
    grid: &mut Grid,
    species: Species,
    count: usize,
    lifetime: u32,
    rng: &mut R,
) -> usize {
    let mut eligible: Vec<Coord> = grid
        .cells()
        .filter(|cell| cell.is_ground())
        .filter(|cell| species == Species::Carviz || cell.herd.is_empty())
        .map(|cell| cell.coord())
        .collect();

    for placed in 0..count {
        if eligible.is_empty() {
            log::warn!(
                "No free ground left for {:?}: placed {} of {}",
                species,
                placed,
                count
            );
            return placed;
        }
        let pick = rng.gen_range(0..eligible.len());
        let at = match species {
            Species::Erbast => eligible.swap_remove(pick),
            Species::Carviz => eligible[pick],
        };
        grid.place(species, at, lifetime, rng.gen_range(INITIAL_ENERGY_RANGE));
    }
    count
}
