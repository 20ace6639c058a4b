//! Terrain grid: cells, vegetation and the spatial queries shared by all rules.

use crate::constants::MAX_DENSITY;
use crate::creature::{Carviz, Creature, Erbast, Species};
use crate::herd::Herd;
use crate::pride::Pride;
use serde::{Deserialize, Serialize};

/// Grid position as (row, column)
pub type Coord = (usize, usize);

/// Offsets of the 8-cell Moore neighborhood
const KERNEL_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Up to 8 in-bounds neighbors of `at` on a `size` x `size` grid, in row-major order.
pub fn neighbor_kernel(at: Coord, size: usize) -> Vec<Coord> {
    let (row, column) = at;
    KERNEL_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = column.checked_add_signed(dc)?;
            (r < size && c < size).then_some((r, c))
        })
        .collect()
}

/// Terrain kind of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Ground,
    Water,
}

/// Vegetation resource of a Ground cell, density in [0, 100]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vegetob {
    density: u32,
}

impl Vegetob {
    pub fn new(density: u32) -> Self {
        Self {
            density: density.min(MAX_DENSITY),
        }
    }

    #[inline]
    pub fn density(&self) -> u32 {
        self.density
    }

    /// Passive growth: +1 per tick, capped at 100
    pub fn grow(&mut self) {
        if self.density < MAX_DENSITY {
            self.density += 1;
        }
    }

    /// Remove grazed vegetation. Never drops below zero.
    pub fn consume(&mut self, amount: u32) {
        self.density = self.density.saturating_sub(amount);
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.density == MAX_DENSITY
    }
}

/// One grid position with its terrain, vegetation and occupants
#[derive(Clone, Debug)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub terrain: Terrain,
    /// Present only on Ground
    pub vegetob: Option<Vegetob>,
    pub herd: Herd,
    pub pride: Pride,
}

impl Cell {
    pub fn ground(row: usize, column: usize, density: u32) -> Self {
        Self {
            row,
            column,
            terrain: Terrain::Ground,
            vegetob: Some(Vegetob::new(density)),
            herd: Herd::new((row, column)),
            pride: Pride::new((row, column)),
        }
    }

    pub fn water(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            terrain: Terrain::Water,
            vegetob: None,
            herd: Herd::new((row, column)),
            pride: Pride::new((row, column)),
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        (self.row, self.column)
    }

    #[inline]
    pub fn is_ground(&self) -> bool {
        self.terrain == Terrain::Ground
    }

    /// Vegetation density, 0 for Water
    #[inline]
    pub fn density(&self) -> u32 {
        self.vegetob.map_or(0, |v| v.density())
    }

    /// True if any Erbast or Carviz stands here
    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.herd.is_empty() || !self.pride.is_empty()
    }

    /// Neighbor coordinates of this cell on a grid of the given side length
    pub fn neighbor_kernel(&self, size: usize) -> Vec<Coord> {
        neighbor_kernel(self.coord(), size)
    }
}

/// Square terrain grid, stored row-major
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid by asking `make` for every (row, column)
    pub fn from_fn<F>(size: usize, mut make: F) -> Self
    where
        F: FnMut(usize, usize) -> Cell,
    {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for column in 0..size {
                cells.push(make(row, column));
            }
        }
        Self { size, cells }
    }

    /// All-Ground grid with a uniform vegetation density
    pub fn uniform(size: usize, density: u32) -> Self {
        Self::from_fn(size, |row, column| Cell::ground(row, column, density))
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `at`. Panics when out of bounds.
    #[inline]
    pub fn cell(&self, at: Coord) -> &Cell {
        assert!(at.0 < self.size && at.1 < self.size, "coordinate {at:?} out of bounds");
        &self.cells[at.0 * self.size + at.1]
    }

    /// Mutable cell at `at`. Panics when out of bounds.
    #[inline]
    pub fn cell_mut(&mut self, at: Coord) -> &mut Cell {
        assert!(at.0 < self.size && at.1 < self.size, "coordinate {at:?} out of bounds");
        &mut self.cells[at.0 * self.size + at.1]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |column| (row, column)))
    }

    /// Neighbor kernel of `at`, bounded by this grid's size
    #[inline]
    pub fn neighbor_kernel(&self, at: Coord) -> Vec<Coord> {
        neighbor_kernel(at, self.size)
    }

    /// Ground neighbors of `at`
    pub fn ground_neighbors(&self, at: Coord) -> Vec<Coord> {
        self.neighbor_kernel(at)
            .into_iter()
            .filter(|&n| self.cell(n).is_ground())
            .collect()
    }

    pub fn erbast_count(&self) -> usize {
        self.cells.iter().map(|c| c.herd.len()).sum()
    }

    pub fn carviz_count(&self) -> usize {
        self.cells.iter().map(|c| c.pride.len()).sum()
    }

    pub fn ground_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_ground()).count()
    }

    /// Mean vegetation density over Ground cells
    pub fn mean_density(&self) -> f32 {
        let ground = self.ground_count();
        if ground == 0 {
            return 0.0;
        }
        let total: u64 = self.cells.iter().map(|c| c.density() as u64).sum();
        total as f32 / ground as f32
    }

    /// Mass local extinction: an occupied interior cell whose 8 neighbors are all
    /// Ground at full density loses its whole herd and pride.
    ///
    /// Returns the number of creatures removed.
    pub fn mass_death_check(&mut self, at: Coord) -> usize {
        let cell = self.cell(at);
        if !cell.is_occupied() {
            return 0;
        }

        let kernel = cell.neighbor_kernel(self.size);
        if kernel.len() != 8 {
            return 0;
        }

        let saturated = kernel
            .iter()
            .all(|&n| self.cell(n).vegetob.is_some_and(|v| v.is_full()));
        if !saturated {
            return 0;
        }

        let cell = self.cell_mut(at);
        cell.herd.clear() + cell.pride.clear()
    }

    /// Move member `index` of the `C` group at `from` into the group at `to`.
    ///
    /// Removal, position update and insertion happen together so a creature's
    /// stored position always names the group that owns it.
    pub fn relocate<C: Creature>(&mut self, from: Coord, index: usize, to: Coord) {
        let mut creature = C::group_mut(self.cell_mut(from)).remove(index);
        creature.depart(from);
        C::group_mut(self.cell_mut(to)).push(creature);
    }

    /// Place a fresh creature of `species` at `at`
    pub fn place(&mut self, species: Species, at: Coord, lifetime: u32, energy: i32) {
        let cell = self.cell_mut(at);
        match species {
            Species::Erbast => cell.herd.push(Erbast::new(at, lifetime, energy)),
            Species::Carviz => cell.pride.push(Carviz::new(at, lifetime, energy)),
        }
    }

    /// Clear every creature's moved flag before a movement phase
    pub fn reset_moved_flags(&mut self) {
        for cell in &mut self.cells {
            for erbast in cell.herd.iter_mut() {
                erbast.vitals.has_moved = false;
            }
            for carviz in cell.pride.iter_mut() {
                carviz.vitals.has_moved = false;
            }
        }
    }
}
