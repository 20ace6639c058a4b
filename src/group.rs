//! Per-cell creature groups and the collective rules Herd and Pride share.

use crate::constants::{HIGH_SOCIALITY, OFFSPRING_PER_PARENT};
use crate::creature::{Aging, Creature};
use crate::grid::{Coord, Grid};
use rand::Rng;

/// Ordered collection of creatures living on one cell.
///
/// Insertion order is kept; every member's stored position equals `(row, column)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Group<C> {
    pub row: usize,
    pub column: usize,
    members: Vec<C>,
}

/// Births and deaths produced by one round of collective aging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgingReport {
    pub births: usize,
    pub deaths: usize,
}

impl<C> Group<C> {
    pub fn new(at: Coord) -> Self {
        Self {
            row: at.0,
            column: at.1,
            members: Vec::new(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        (self.row, self.column)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn members(&self) -> &[C] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, C> {
        self.members.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.members.get_mut(index)
    }

    /// Remove and return member `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> C {
        self.members.remove(index)
    }

    /// Drop every member. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.members.len();
        self.members.clear();
        removed
    }

    /// Move all members out, leaving the group empty
    pub fn take_members(&mut self) -> Vec<C> {
        std::mem::take(&mut self.members)
    }

    pub fn into_members(self) -> Vec<C> {
        self.members
    }
}

impl<C: Creature> Group<C> {
    /// Append a creature, rewriting its position to this group's cell
    pub fn push(&mut self, mut creature: C) {
        let vitals = creature.vitals_mut();
        vitals.row = self.row;
        vitals.column = self.column;
        self.members.push(creature);
    }

    pub fn extend<I: IntoIterator<Item = C>>(&mut self, creatures: I) {
        for creature in creatures {
            self.push(creature);
        }
    }

    /// Age every member once; expired members are removed after the pass and
    /// their offspring appended.
    pub fn age(&mut self) -> AgingReport {
        let mut expired = Vec::new();
        let mut newborn = Vec::new();

        for (idx, member) in self.members.iter_mut().enumerate() {
            match member.vitals_mut().grow_older() {
                Aging::Lives => {}
                Aging::Dies => expired.push(idx),
                Aging::Reproduces { offspring_energy } => {
                    for _ in 0..OFFSPRING_PER_PARENT {
                        newborn.push(member.offspring(offspring_energy));
                    }
                    expired.push(idx);
                }
            }
        }

        for &idx in expired.iter().rev() {
            self.members.remove(idx);
        }

        let report = AgingReport {
            births: newborn.len(),
            deaths: expired.len(),
        };
        self.extend(newborn);
        report
    }

    /// Median social attitude of the members given the cell population
    pub fn median_attitude(&self, population: usize) -> f64 {
        let attitudes: Vec<f64> = self
            .members
            .iter()
            .map(|m| social_attitude(population, m.vitals().energy))
            .collect();
        median(attitudes)
    }
}

/// Willingness to follow the group: (100 - population) * energy / 100.
///
/// A population of exactly 100 uses 1 in place of the zero factor.
pub fn social_attitude(population: usize, energy: i32) -> f64 {
    let inverse = if population == 100 {
        1.0
    } else {
        100.0 - population as f64
    };
    inverse * energy as f64 / 100.0
}

/// Median, averaging the two middle values for even lengths; 0 when empty
pub fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Run each not-yet-moved member of the `C` group at `at` through its movement
/// decision, relocating those that choose another cell.
///
/// `population` supplies the cell population used for the social attitude.
/// Returns how many members moved.
pub(crate) fn decide_members<C, R, P>(grid: &mut Grid, at: Coord, rng: &mut R, population: P) -> usize
where
    C: Creature,
    R: Rng + ?Sized,
    P: Fn(&Grid) -> usize,
{
    let mut index = 0;
    let mut moved = 0;

    while index < C::group(grid.cell(at)).len() {
        let member = &C::group(grid.cell(at)).members()[index];
        if member.vitals().has_moved {
            index += 1;
            continue;
        }

        let attitude = social_attitude(population(grid), member.vitals().energy);
        let decision = member.decide_movement(grid, attitude >= HIGH_SOCIALITY, rng);

        if let Some(member) = C::group_mut(grid.cell_mut(at)).get_mut(index) {
            let vitals = member.vitals_mut();
            vitals.neighbors = decision.neighbors;
            if decision.target == at {
                vitals.has_moved = false;
            }
        }

        if decision.target == at {
            index += 1;
        } else {
            // The removal shifts the next member into `index`
            grid.relocate::<C>(at, index, decision.target);
            moved += 1;
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{Carviz, Erbast};

    #[test]
    fn test_social_attitude() {
        assert!((social_attitude(0, 80) - 80.0).abs() < 1e-9);
        assert!((social_attitude(50, 80) - 40.0).abs() < 1e-9);
        assert!((social_attitude(100, 80) - 0.8).abs() < 1e-9);
        assert!(social_attitude(120, 50) < 0.0);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_push_rewrites_position() {
        let mut group = Group::new((2, 3));
        group.push(Erbast::new((0, 0), 10, 50));
        assert_eq!(group.members()[0].vitals.position(), (2, 3));
    }

    #[test]
    fn test_age_spawns_two_offspring() {
        let mut herd = Group::new((1, 1));
        let mut parent = Erbast::new((1, 1), 10, 22);
        parent.vitals.age = 9;
        herd.push(parent);

        let report = herd.age();

        assert_eq!(report, AgingReport { births: 2, deaths: 1 });
        assert_eq!(herd.len(), 2);
        for child in herd.iter() {
            assert_eq!(child.vitals.energy, 11);
            assert_eq!(child.vitals.age, 0);
            assert_eq!(child.vitals.position(), (1, 1));
        }
    }

    #[test]
    fn test_age_removes_without_skipping() {
        // Adjacent expiring members must all be handled in one pass
        let mut pride = Group::new((0, 0));
        for energy in [1, 1, 50, 1] {
            pride.push(Carviz::new((0, 0), 10, energy));
        }

        let report = pride.age();

        assert_eq!(report.deaths, 3);
        assert_eq!(report.births, 0);
        assert_eq!(pride.len(), 1);
        assert_eq!(pride.members()[0].vitals.energy, 50);
        assert_eq!(pride.members()[0].vitals.age, 1);
    }

    #[test]
    fn test_median_attitude() {
        let mut pride = Group::new((0, 0));
        for energy in [20, 60, 100] {
            pride.push(Carviz::new((0, 0), 10, energy));
        }
        // population 3: factor 0.97
        assert!((pride.median_attitude(3) - 58.2).abs() < 1e-9);
    }

    #[test]
    fn test_decide_members_moves_each_once() {
        let mut grid = Grid::uniform(3, 10);
        for _ in 0..4 {
            grid.place(crate::creature::Species::Carviz, (1, 1), 10, 90);
        }
        let mut rng = <rand_chacha::ChaCha8Rng as rand::SeedableRng>::seed_from_u64(3);

        let moved = decide_members::<Carviz, _, _>(&mut grid, (1, 1), &mut rng, |g| {
            g.cell((1, 1)).pride.len()
        });

        // Empty surroundings: every predator wanders off to a random neighbor
        assert_eq!(moved, 4);
        assert!(grid.cell((1, 1)).pride.is_empty());
        assert_eq!(grid.carviz_count(), 4);
        for cell in grid.cells() {
            for carviz in cell.pride.iter() {
                assert_eq!(carviz.vitals.position(), cell.coord());
                assert_eq!(carviz.vitals.energy, 89);
            }
        }
    }
}
