//! Behavioral constants shared by the creature and group rules.

/// Upper bound for creature energy and vegetation density.
pub const MAX_LEVEL: i32 = 100;

/// Vegetation density cap (same scale as energy).
pub const MAX_DENSITY: u32 = 100;

/// Initial vegetation density range, half-open.
pub const INITIAL_DENSITY_RANGE: std::ops::Range<u32> = 1..100;

/// Initial creature energy range, half-open.
pub const INITIAL_ENERGY_RANGE: std::ops::Range<i32> = 35..95;

/// Minimum energy for an Erbast to follow the crowd when socially inclined.
pub const ERBAST_SOCIAL_ENERGY: i32 = 30;

/// Local density at which a socially inclined Erbast is content to stay.
pub const ERBAST_SOCIAL_STAY_DENSITY: u32 = 35;

/// Energy at or below which a stationary Erbast counts as starving.
pub const STARVING_ENERGY: i32 = 40;

/// Minimum energy for a Carviz to leave a cell that still holds prey.
pub const CARVIZ_ROAM_ENERGY: i32 = 40;

/// Social attitude at or above which a creature counts as highly social.
pub const HIGH_SOCIALITY: f64 = 50.0;

/// Median attitude every remaining sub-pride needs before they merge.
pub const MERGE_THRESHOLD: f64 = 10.0;

/// Energy a dying creature needs at end of life to leave offspring.
pub const REPRODUCTION_ENERGY: i32 = 20;

/// Offspring produced per reproduction event.
pub const OFFSPRING_PER_PARENT: usize = 2;

/// Energy at or below which a creature dies while aging.
pub const EXHAUSTION_ENERGY: i32 = 1;
