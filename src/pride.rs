//! Pride: the Carviz living on one cell, and fights between sub-prides.

use crate::constants::MERGE_THRESHOLD;
use crate::creature::Carviz;
use crate::grid::{Coord, Grid};
use crate::group::{decide_members, Group};
use rand::Rng;

pub type Pride = Group<Carviz>;

/// Result of a fight round on one cell
#[derive(Clone, Debug)]
pub struct FightOutcome {
    /// Sub-prides left on the cell
    pub survivors: Vec<Pride>,
    /// Predators removed with the drawn sub-pride
    pub casualties: usize,
    /// Whether the remaining sub-prides joined into one
    pub merged: bool,
}

impl FightOutcome {
    /// True when at least two sub-prides met
    pub fn contested(&self) -> bool {
        self.casualties > 0 || self.merged || self.survivors.len() > 1
    }
}

impl Pride {
    /// Movement decision for every Carviz on `at`.
    ///
    /// Each predator's attitude sees the pride population at its own turn.
    pub fn decide<R: Rng + ?Sized>(grid: &mut Grid, at: Coord, rng: &mut R) -> usize {
        decide_members::<Carviz, _, _>(grid, at, rng, |grid| grid.cell(at).pride.len())
    }

    /// Split predators into sub-prides by their `previously_visited` tag,
    /// in order of first appearance.
    pub fn split_by_tag(at: Coord, members: Vec<Carviz>) -> Vec<Pride> {
        let mut tagged: Vec<(Option<Coord>, Pride)> = Vec::new();
        for carviz in members {
            let tag = carviz.previously_visited;
            match tagged.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, pride)) => pride.push(carviz),
                None => {
                    let mut pride = Pride::new(at);
                    pride.push(carviz);
                    tagged.push((tag, pride));
                }
            }
        }
        tagged.into_iter().map(|(_, pride)| pride).collect()
    }

    /// Fight between the sub-prides formed by `members` on `at`.
    ///
    /// With fewer than two sub-prides nothing happens. Otherwise one sub-pride is
    /// drawn uniformly and removed from the cell; if more than one remains and
    /// every remaining median attitude is at least 10, they join into one pride.
    pub fn fight<R: Rng + ?Sized>(at: Coord, members: Vec<Carviz>, rng: &mut R) -> FightOutcome {
        let population = members.len();
        let mut prides = Self::split_by_tag(at, members);
        if prides.len() < 2 {
            return FightOutcome {
                survivors: prides,
                casualties: 0,
                merged: false,
            };
        }

        let medians: Vec<f64> = prides.iter().map(|p| p.median_attitude(population)).collect();
        log::trace!("fight at {:?}: {} sub-prides, medians {:?}", at, prides.len(), medians);

        // The drawn sub-pride leaves the cell; the others stay.
        let drawn = rng.gen_range(0..prides.len());
        let casualties = prides.remove(drawn).len();

        let mut merged = false;
        if prides.len() > 1
            && prides
                .iter()
                .all(|p| p.median_attitude(population) >= MERGE_THRESHOLD)
        {
            let mut joined = Pride::new(at);
            for pride in prides {
                for mut carviz in pride.into_members() {
                    // Intentional retag: the merged pride is one sub-pride
                    // next tick and does not fight itself
                    carviz.previously_visited = Some(at);
                    joined.push(carviz);
                }
            }
            prides = vec![joined];
            merged = true;
        }

        FightOutcome {
            survivors: prides,
            casualties,
            merged,
        }
    }

    /// Resolve the fight on this cell in place. Returns the outcome with the
    /// survivors already moved back into the pride.
    pub fn resolve_fight<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FightOutcome {
        let members = self.take_members();
        let mut outcome = Self::fight(self.coord(), members, rng);
        for pride in &mut outcome.survivors {
            self.extend(pride.take_members());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tagged(tag: Option<Coord>, energy: i32) -> Carviz {
        let mut carviz = Carviz::new((2, 2), 10, energy);
        carviz.previously_visited = tag;
        carviz
    }

    #[test]
    fn test_split_by_tag_keeps_first_seen_order() {
        let members = vec![
            tagged(Some((1, 1)), 50),
            tagged(None, 50),
            tagged(Some((1, 1)), 60),
            tagged(Some((3, 3)), 50),
        ];

        let prides = Pride::split_by_tag((2, 2), members);

        assert_eq!(prides.len(), 3);
        assert_eq!(prides[0].len(), 2);
        assert_eq!(prides[1].len(), 1);
        assert_eq!(prides[2].len(), 1);
    }

    #[test]
    fn test_single_sub_pride_no_fight() {
        let members = vec![tagged(None, 50), tagged(None, 70)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = Pride::fight((2, 2), members, &mut rng);

        assert_eq!(outcome.survivors.len(), 1);
        assert_eq!(outcome.survivors[0].len(), 2);
        assert_eq!(outcome.casualties, 0);
        assert!(!outcome.contested());
    }

    #[test]
    fn test_two_sub_prides_leave_one() {
        let members = vec![tagged(Some((1, 1)), 50), tagged(Some((3, 3)), 50)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = Pride::fight((2, 2), members, &mut rng);

        assert_eq!(outcome.survivors.len(), 1);
        assert_eq!(outcome.casualties, 1);
        assert!(!outcome.merged);
        assert!(outcome.contested());
    }

    #[test]
    fn test_three_sub_prides_merge_when_confident() {
        for seed in 0..20 {
            let members = vec![
                tagged(Some((1, 1)), 80),
                tagged(Some((1, 2)), 80),
                tagged(Some((1, 3)), 80),
            ];
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let outcome = Pride::fight((2, 2), members, &mut rng);

            assert_eq!(outcome.survivors.len(), 1);
            assert!(outcome.merged);
            assert_eq!(outcome.casualties, 1);
            let joined = &outcome.survivors[0];
            assert_eq!(joined.len(), 2);
            assert!(joined.iter().all(|c| c.previously_visited == Some((2, 2))));
        }
    }

    #[test]
    fn test_three_sub_prides_stay_apart_when_weak() {
        // Attitude with population 3: 0.97 * 5 < 10
        let members = vec![
            tagged(Some((1, 1)), 5),
            tagged(Some((1, 2)), 5),
            tagged(Some((1, 3)), 5),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let outcome = Pride::fight((2, 2), members, &mut rng);

        assert_eq!(outcome.survivors.len(), 2);
        assert!(!outcome.merged);
    }

    #[test]
    fn test_resolve_fight_in_place() {
        let mut pride = Pride::new((2, 2));
        pride.push(tagged(Some((1, 1)), 80));
        pride.push(tagged(Some((1, 1)), 80));
        pride.push(tagged(Some((3, 3)), 80));
        pride.push(tagged(None, 80));
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let outcome = pride.resolve_fight(&mut rng);

        assert_eq!(pride.len() + outcome.casualties, 4);
        assert!(pride.iter().all(|c| c.vitals.position() == (2, 2)));
    }
}
