//! Herd: the Erbast living on one cell.

use crate::constants::STARVING_ENERGY;
use crate::creature::Erbast;
use crate::grid::{Coord, Grid, Vegetob};
use crate::group::{decide_members, Group};
use rand::Rng;

pub type Herd = Group<Erbast>;

/// How a cell's vegetation is split among its herd for one tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrazingPlan {
    /// (member index, amount offered)
    pub shares: Vec<(usize, i32)>,
}

impl GrazingPlan {
    /// Allocate `density` among a herd of `population` where `starving` lists
    /// the indices of starving members in group order.
    ///
    /// - fewer starving than density: each starving member is offered density / starving
    /// - more starving than density: only the first `density` starving members eat, 1 each
    /// - equal: the whole density is split across every member, the first
    ///   `density % population` members getting one extra unit
    pub fn allocate(starving: &[usize], density: u32, population: usize) -> Self {
        let density_count = density as usize;
        let starving_count = starving.len();

        let shares = if starving_count < density_count {
            // Nobody starving means nobody is offered anything
            let share = (density_count / starving_count.max(1)) as i32;
            starving.iter().map(|&idx| (idx, share)).collect()
        } else if starving_count > density_count {
            starving.iter().take(density_count).map(|&idx| (idx, 1)).collect()
        } else if population == 0 {
            Vec::new()
        } else {
            let share = density_count / population;
            let extra = density_count % population;
            (0..population)
                .map(|idx| (idx, (share + usize::from(idx < extra)) as i32))
                .collect()
        };

        Self { shares }
    }

    /// Total vegetation offered by the plan
    pub fn offered(&self) -> i32 {
        self.shares.iter().map(|&(_, share)| share).sum()
    }
}

impl Herd {
    /// Movement decision for every Erbast on `at`.
    ///
    /// Attitude uses the herd population as it was when the decision round began.
    pub fn decide<R: Rng + ?Sized>(grid: &mut Grid, at: Coord, rng: &mut R) -> usize {
        let population = grid.cell(at).herd.len();
        decide_members::<Erbast, _, _>(grid, at, rng, |_| population)
    }

    /// Indices of members with energy <= 40 that did not move this tick
    pub fn starving(&self) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, e)| e.vitals.energy <= STARVING_ENERGY && !e.vitals.has_moved)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Collective feeding on this cell's vegetation. Returns the total eaten.
    pub fn graze(&mut self, vegetob: &mut Vegetob) -> u32 {
        let plan = GrazingPlan::allocate(&self.starving(), vegetob.density(), self.len());

        let mut eaten = 0;
        for (idx, share) in plan.shares {
            if let Some(erbast) = self.get_mut(idx) {
                eaten += erbast.graze(vegetob, share) as u32;
            }
        }
        eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn herd_with(energies: &[i32]) -> Herd {
        let mut herd = Herd::new((1, 1));
        for &energy in energies {
            herd.push(Erbast::new((1, 1), 10, energy));
        }
        herd
    }

    #[test]
    fn test_graze_fewer_starving_than_density() {
        let mut herd = herd_with(&[30, 30, 30]);
        let mut vegetob = Vegetob::new(6);

        let eaten = herd.graze(&mut vegetob);

        assert_eq!(eaten, 6);
        assert_eq!(vegetob.density(), 0);
        assert!(herd.iter().all(|e| e.vitals.energy == 32));
    }

    #[test]
    fn test_graze_well_fed_get_nothing() {
        let mut herd = herd_with(&[30, 80, 30, 90, 30]);
        let mut vegetob = Vegetob::new(6);

        herd.graze(&mut vegetob);

        let energies: Vec<i32> = herd.iter().map(|e| e.vitals.energy).collect();
        assert_eq!(energies, vec![32, 80, 32, 90, 32]);
    }

    #[test]
    fn test_graze_more_starving_than_density() {
        let mut herd = herd_with(&[10, 10, 10, 10, 10]);
        let mut vegetob = Vegetob::new(2);

        let eaten = herd.graze(&mut vegetob);

        assert_eq!(eaten, 2);
        assert_eq!(vegetob.density(), 0);
        let energies: Vec<i32> = herd.iter().map(|e| e.vitals.energy).collect();
        assert_eq!(energies, vec![11, 11, 10, 10, 10]);
    }

    #[test]
    fn test_graze_starving_equals_density() {
        let mut herd = herd_with(&[20, 20, 20, 20]);
        let mut vegetob = Vegetob::new(4);

        herd.graze(&mut vegetob);

        assert!(herd.iter().all(|e| e.vitals.energy == 21));
        assert_eq!(vegetob.density(), 0);
    }

    #[test]
    fn test_graze_equal_case_feeds_mixed_herd() {
        let mut herd = herd_with(&[10, 10, 80, 80]);
        let mut vegetob = Vegetob::new(2);

        let eaten = herd.graze(&mut vegetob);

        assert_eq!(eaten, 2);
        assert_eq!(vegetob.density(), 0);
        let energies: Vec<i32> = herd.iter().map(|e| e.vitals.energy).collect();
        assert_eq!(energies, vec![11, 11, 80, 80]);
    }

    #[test]
    fn test_allocate_equal_case_spreads_remainder() {
        let plan = GrazingPlan::allocate(&[0, 3, 4], 3, 5);
        assert_eq!(plan.shares, vec![(0, 1), (1, 1), (2, 1), (3, 0), (4, 0)]);

        let plan = GrazingPlan::allocate(&[1, 2, 5, 6, 7, 8, 9], 7, 3 + 7);
        assert_eq!(plan.offered(), 7);
    }

    #[test]
    fn test_graze_moved_members_are_not_starving() {
        let mut herd = herd_with(&[10, 10]);
        herd.get_mut(0).expect("member").vitals.has_moved = true;
        let mut vegetob = Vegetob::new(10);

        herd.graze(&mut vegetob);

        assert_eq!(herd.members()[0].vitals.energy, 10);
        assert_eq!(herd.members()[1].vitals.energy, 20);
    }

    #[test]
    fn test_graze_no_starving_eats_nothing() {
        let mut herd = herd_with(&[70, 90]);
        let mut vegetob = Vegetob::new(50);

        assert_eq!(herd.graze(&mut vegetob), 0);
        assert_eq!(vegetob.density(), 50);
    }

    #[test]
    fn test_graze_never_exceeds_density() {
        let mut herd = herd_with(&[5, 5, 5]);
        let mut vegetob = Vegetob::new(100);

        let eaten = herd.graze(&mut vegetob);

        assert_eq!(eaten, 99);
        assert_eq!(vegetob.density(), 1);
        assert!(herd.iter().all(|e| e.vitals.energy == 38));
    }

    #[test]
    fn test_allocate_equal_case_with_zero() {
        assert!(GrazingPlan::allocate(&[], 0, 0).shares.is_empty());
        let plan = GrazingPlan::allocate(&[], 0, 3);
        assert_eq!(plan.offered(), 0);
    }

    #[test]
    fn test_decide_moves_toward_herd() {
        let mut grid = Grid::uniform(3, 10);
        grid.place(Species::Erbast, (0, 0), 10, 90);
        grid.place(Species::Erbast, (0, 0), 10, 90);
        grid.place(Species::Erbast, (1, 1), 10, 90);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        // Attitude (100 - 1) * 90 / 100 is high; (0, 0) holds the biggest herd
        let moved = Herd::decide(&mut grid, (1, 1), &mut rng);

        assert_eq!(moved, 1);
        assert_eq!(grid.cell((0, 0)).herd.len(), 3);
        assert!(grid.cell((1, 1)).herd.is_empty());
    }

    #[test]
    fn test_decide_skips_arrivals() {
        let mut grid = Grid::uniform(3, 10);
        grid.place(Species::Erbast, (1, 1), 10, 90);
        grid.cell_mut((1, 1)).herd.get_mut(0).expect("member").vitals.has_moved = true;
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert_eq!(Herd::decide(&mut grid, (1, 1), &mut rng), 0);
        assert_eq!(grid.cell((1, 1)).herd.len(), 1);
    }
}
