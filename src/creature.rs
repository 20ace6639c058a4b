//! Erbast (herbivore) and Carviz (predator) behavior.

use crate::constants::*;
use crate::grid::{Cell, Coord, Grid, Vegetob};
use crate::group::Group;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Creature kind, used where placement must pick the matching group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Erbast,
    Carviz,
}

/// State shared by both creature kinds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub energy: i32,
    pub age: u32,
    pub lifetime: u32,
    pub row: usize,
    pub column: usize,
    pub has_moved: bool,
    /// Neighbor kernel from the last movement decision
    pub neighbors: Vec<Coord>,
}

/// What one tick of aging did to a creature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aging {
    Lives,
    Dies,
    /// Dies, leaving offspring with this much energy each
    Reproduces { offspring_energy: i32 },
}

impl Vitals {
    pub fn new(at: Coord, lifetime: u32, energy: i32) -> Self {
        Self {
            energy,
            age: 0,
            lifetime,
            row: at.0,
            column: at.1,
            has_moved: false,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Coord {
        (self.row, self.column)
    }

    /// Advance age by one tick and apply the end-of-life rule
    pub fn grow_older(&mut self) -> Aging {
        self.age += 1;

        let exhausted = self.energy <= EXHAUSTION_ENERGY;
        let expired = self.age >= self.lifetime;

        if exhausted || expired {
            if self.energy >= REPRODUCTION_ENERGY && expired {
                return Aging::Reproduces {
                    offspring_energy: self.energy / 2,
                };
            }
            return Aging::Dies;
        }

        if self.lifetime > 0 && self.age % self.lifetime == 0 {
            self.energy -= 1;
        }
        Aging::Lives
    }

    /// Add energy up to the cap. Returns the amount actually absorbed.
    pub fn absorb(&mut self, amount: i32) -> i32 {
        let intake = (MAX_LEVEL - self.energy).min(amount).max(0);
        self.energy += intake;
        intake
    }
}

/// Outcome of a movement decision
#[derive(Clone, Debug, PartialEq)]
pub struct MoveDecision {
    pub target: Coord,
    /// Kernel evaluated for the decision, cached on the creature
    pub neighbors: Vec<Coord>,
}

/// Behavior common to members of a Herd or Pride
pub trait Creature: Sized {
    fn vitals(&self) -> &Vitals;

    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Newborn of the same kind at the parent's position
    fn offspring(&self, energy: i32) -> Self;

    /// Pick the next cell. Returns the current cell to stay.
    fn decide_movement<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        high_sociality: bool,
        rng: &mut R,
    ) -> MoveDecision;

    /// The group of this kind owned by `cell`
    fn group(cell: &Cell) -> &Group<Self>;

    fn group_mut(cell: &mut Cell) -> &mut Group<Self>;

    /// Bookkeeping when leaving `from` for another cell
    fn depart(&mut self, _from: Coord) {
        let vitals = self.vitals_mut();
        vitals.energy -= 1;
        vitals.has_moved = true;
    }
}

/// Uniformly random Ground neighbor, if any
fn random_ground_neighbor<R: Rng + ?Sized>(grid: &Grid, at: Coord, rng: &mut R) -> Option<Coord> {
    grid.ground_neighbors(at).choose(rng).copied()
}

/// Random choice among Ground neighbors achieving the highest score.
/// Neighbors scoring 0 still tie at the initial maximum.
fn best_with_random_tie<R, F>(grid: &Grid, neighbors: &[Coord], score: F, rng: &mut R) -> Option<Coord>
where
    R: Rng + ?Sized,
    F: Fn(&Cell) -> usize,
{
    let mut best = 0;
    let mut ties = Vec::new();
    for &n in neighbors {
        let cell = grid.cell(n);
        if !cell.is_ground() {
            continue;
        }
        let value = score(cell);
        if value > best {
            best = value;
            ties.clear();
            ties.push(n);
        } else if value == best {
            ties.push(n);
        }
    }
    ties.choose(rng).copied()
}

/// First Ground neighbor whose score strictly beats `floor` and every earlier one.
fn first_strictly_best<F>(grid: &Grid, neighbors: &[Coord], floor: usize, score: F) -> Option<Coord>
where
    F: Fn(&Cell) -> usize,
{
    let mut best = floor;
    let mut found = None;
    for &n in neighbors {
        let cell = grid.cell(n);
        if !cell.is_ground() {
            continue;
        }
        let value = score(cell);
        if value > best {
            best = value;
            found = Some(n);
        }
    }
    found
}

/// Herbivore
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Erbast {
    pub vitals: Vitals,
}

impl Erbast {
    pub fn new(at: Coord, lifetime: u32, energy: i32) -> Self {
        Self {
            vitals: Vitals::new(at, lifetime, energy),
        }
    }

    /// Neighbor with the most Erbast, random among ties; current cell if none
    pub fn find_herd<R: Rng + ?Sized>(&self, grid: &Grid, neighbors: &[Coord], rng: &mut R) -> Coord {
        best_with_random_tie(grid, neighbors, |c| c.herd.len(), rng)
            .unwrap_or_else(|| self.vitals.position())
    }

    /// Neighbor with the densest vegetation, random among ties; current cell if none
    pub fn find_food<R: Rng + ?Sized>(&self, grid: &Grid, neighbors: &[Coord], rng: &mut R) -> Coord {
        best_with_random_tie(grid, neighbors, |c| c.density() as usize, rng)
            .unwrap_or_else(|| self.vitals.position())
    }

    /// Eat up to `amount` from `vegetob`, bounded by the energy cap.
    ///
    /// Only the absorbed intake is removed from the vegetation.
    pub fn graze(&mut self, vegetob: &mut Vegetob, amount: i32) -> i32 {
        let intake = self.vitals.absorb(amount);
        vegetob.consume(intake as u32);
        intake
    }
}

impl Creature for Erbast {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn offspring(&self, energy: i32) -> Self {
        Self::new(self.vitals.position(), self.vitals.lifetime, energy)
    }

    fn decide_movement<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        high_sociality: bool,
        rng: &mut R,
    ) -> MoveDecision {
        let here = self.vitals.position();
        let neighbors = grid.neighbor_kernel(here);

        let target = if high_sociality && self.vitals.energy >= ERBAST_SOCIAL_ENERGY {
            let mut target = self.find_herd(grid, &neighbors, rng);
            if target == here {
                target = self.find_food(grid, &neighbors, rng);
            }
            if target == here && grid.cell(here).density() < ERBAST_SOCIAL_STAY_DENSITY {
                target = random_ground_neighbor(grid, here, rng).unwrap_or(here);
            }
            target
        } else {
            // find_food only yields the current cell when no Ground neighbor
            // exists, so the stay threshold never redirects this branch.
            self.find_food(grid, &neighbors, rng)
        };

        MoveDecision { target, neighbors }
    }

    fn group(cell: &Cell) -> &Group<Self> {
        &cell.herd
    }

    fn group_mut(cell: &mut Cell) -> &mut Group<Self> {
        &mut cell.herd
    }
}

/// Predator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Carviz {
    pub vitals: Vitals,
    /// Last cell vacated
    pub previous_position: Option<Coord>,
    /// Fight-group tag; predators sharing it form one sub-pride
    pub previously_visited: Option<Coord>,
}

impl Carviz {
    pub fn new(at: Coord, lifetime: u32, energy: i32) -> Self {
        Self {
            vitals: Vitals::new(at, lifetime, energy),
            previous_position: None,
            previously_visited: None,
        }
    }

    /// First neighbor holding strictly more Erbast than any before it
    pub fn find_herd(&self, grid: &Grid, neighbors: &[Coord]) -> Coord {
        first_strictly_best(grid, neighbors, 0, |c| c.herd.len())
            .unwrap_or_else(|| self.vitals.position())
    }

    /// First neighbor whose pride outnumbers the current cell's and every earlier one
    pub fn find_pride(&self, grid: &Grid, neighbors: &[Coord]) -> Coord {
        let here = self.vitals.position();
        let floor = grid.cell(here).pride.len();
        first_strictly_best(grid, neighbors, floor, |c| c.pride.len()).unwrap_or(here)
    }

    /// Kill the most energetic Erbast in `herd` and absorb its energy.
    ///
    /// The victim is removed even when the predator cannot absorb all of it.
    pub fn hunt(&mut self, herd: &mut Group<Erbast>) -> Option<Erbast> {
        let mut victim_index = None;
        let mut best = i32::MIN;
        for (idx, erbast) in herd.iter().enumerate() {
            if erbast.vitals.energy > best {
                best = erbast.vitals.energy;
                victim_index = Some(idx);
            }
        }

        let victim = herd.remove(victim_index?);
        self.vitals.absorb(victim.vitals.energy);
        Some(victim)
    }
}

impl Creature for Carviz {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn offspring(&self, energy: i32) -> Self {
        Self::new(self.vitals.position(), self.vitals.lifetime, energy)
    }

    fn decide_movement<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        high_sociality: bool,
        rng: &mut R,
    ) -> MoveDecision {
        let here = self.vitals.position();
        let neighbors = grid.neighbor_kernel(here);
        let prey_here = !grid.cell(here).herd.is_empty();

        let mut target = here;
        if !prey_here || self.vitals.energy >= CARVIZ_ROAM_ENERGY {
            target = if high_sociality {
                self.find_pride(grid, &neighbors)
            } else {
                self.find_herd(grid, &neighbors)
            };
        }

        if target == here {
            target = random_ground_neighbor(grid, here, rng).unwrap_or(here);
        }

        MoveDecision { target, neighbors }
    }

    fn group(cell: &Cell) -> &Group<Self> {
        &cell.pride
    }

    fn group_mut(cell: &mut Cell) -> &mut Group<Self> {
        &mut cell.pride
    }

    fn depart(&mut self, from: Coord) {
        self.previous_position = Some(from);
        self.previously_visited = Some(from);
        self.vitals.energy -= 1;
        self.vitals.has_moved = true;
    }
}
