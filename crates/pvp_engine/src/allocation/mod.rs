//! Optimal IV and level allocation under a league CP cap.
//!
//! For every IV triple the allocator keeps the highest level whose CP fits
//! under the cap, then picks the triple with the best stat product.
//!
//! # Selection
//!
//! Candidates are grouped by `(stat product, floor(attack * 100))`. The best
//! group is the lexicographically highest pair; inside it the winner is chosen
//! by: higher stat product, lower Attack IV, higher HP, higher Defense, lower
//! CP. The worst result is the first candidate of the lowest group.

mod cpm;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use cpm::{Level, LevelRange, CP_MULTIPLIERS, LEVEL_COUNT};

/// Highest value of a single IV.
pub const MAX_IV: u8 = 15;

/// Lowest CP the game reports.
pub const MIN_CP: u32 = 10;

/// Lowest HP the game reports.
pub const MIN_HP: u32 = 10;

/// Species base stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(rename = "atk")]
    pub attack: u16,
    #[serde(rename = "def")]
    pub defense: u16,
    #[serde(rename = "hp")]
    pub stamina: u16,
}

impl BaseStats {
    pub const fn new(attack: u16, defense: u16, stamina: u16) -> Self {
        Self {
            attack,
            defense,
            stamina,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.attack > 0 && self.defense > 0 && self.stamina > 0
    }
}

/// Individual values [Attack, Defense, Stamina].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ivs {
    pub attack: u8,
    pub defense: u8,
    pub stamina: u8,
}

impl Ivs {
    pub const PERFECT: Ivs = Ivs::new(MAX_IV, MAX_IV, MAX_IV);

    pub const fn new(attack: u8, defense: u8, stamina: u8) -> Self {
        Self {
            attack,
            defense,
            stamina,
        }
    }

    /// Every triple with all values in `[floor, 15]`, attack-major order.
    pub fn all(floor: u8) -> impl Iterator<Item = Ivs> {
        let floor = floor.min(MAX_IV);
        (floor..=MAX_IV).flat_map(move |a| {
            (floor..=MAX_IV)
                .flat_map(move |d| (floor..=MAX_IV).map(move |s| Ivs::new(a, d, s)))
        })
    }
}

/// A chosen IV triple and level with the stats they produce.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatAllocation {
    pub ivs: Ivs,
    pub level: Level,
    pub cp: u32,
    pub attack: f64,
    pub defense: f64,
    pub hp: u32,
}

impl StatAllocation {
    /// Zeroed allocation marking a creature that cannot enter the league.
    pub fn ineligible() -> Self {
        Self {
            ivs: Ivs::default(),
            level: Level::MIN,
            cp: 0,
            attack: 0.0,
            defense: 0.0,
            hp: 0,
        }
    }

    /// Stats for an IV triple at a level.
    pub fn compute(base: BaseStats, ivs: Ivs, level: Level) -> Self {
        let cpm = level.multiplier();
        let atk = base.attack as f64 + ivs.attack as f64;
        let def = base.defense as f64 + ivs.defense as f64;
        let sta = base.stamina as f64 + ivs.stamina as f64;

        let cp = ((atk * def.sqrt() * sta.sqrt() * cpm * cpm / 10.0).floor() as u32).max(MIN_CP);
        let hp = ((sta * cpm).floor() as u32).max(MIN_HP);

        Self {
            ivs,
            level,
            cp,
            attack: atk * cpm,
            defense: def * cpm,
            hp,
        }
    }

    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.cp > 0
    }

    /// Attack x Defense x HP.
    #[inline]
    pub fn stat_product(&self) -> f64 {
        self.attack * self.defense * self.hp as f64
    }

    /// Grouping key: (stat product, attack to two decimals).
    fn group_key(&self) -> (f64, i64) {
        (self.stat_product(), (self.attack * 100.0).floor() as i64)
    }
}

/// CP for an IV triple at a level.
pub fn compute_cp(base: BaseStats, ivs: Ivs, level: Level) -> u32 {
    StatAllocation::compute(base, ivs, level).cp
}

/// Best and worst allocation for one creature in one league.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub best: StatAllocation,
    pub worst: StatAllocation,
}

impl AllocationResult {
    fn ineligible() -> Self {
        Self {
            best: StatAllocation::ineligible(),
            worst: StatAllocation::ineligible(),
        }
    }

    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.best.is_eligible()
    }
}

/// Search every IV triple for the allocation that maximizes stat product
/// without exceeding `cap`. `None` means uncapped: every triple is
/// evaluated at the range's maximum level only.
pub fn allocate(
    base: BaseStats,
    cap: Option<u32>,
    iv_floor: u8,
    levels: LevelRange,
) -> AllocationResult {
    if !base.is_valid() {
        return AllocationResult::ineligible();
    }

    let candidates: Vec<StatAllocation> = Ivs::all(iv_floor)
        .filter_map(|ivs| best_level_for(base, ivs, cap, levels))
        .collect();

    if candidates.is_empty() {
        let fallback = StatAllocation::compute(base, Ivs::PERFECT, levels.min);
        return match cap {
            Some(cap) if fallback.cp > cap => AllocationResult::ineligible(),
            _ => AllocationResult {
                best: fallback,
                worst: fallback,
            },
        };
    }

    let top = candidates
        .iter()
        .map(StatAllocation::group_key)
        .max_by(compare_keys)
        .unwrap_or((0.0, 0));
    let bottom = candidates
        .iter()
        .map(StatAllocation::group_key)
        .min_by(compare_keys)
        .unwrap_or((0.0, 0));

    let best = candidates
        .iter()
        .filter(|c| compare_keys(&c.group_key(), &top) == Ordering::Equal)
        .copied()
        .min_by(rank_within_group);
    let worst = candidates
        .iter()
        .find(|c| compare_keys(&c.group_key(), &bottom) == Ordering::Equal)
        .copied();

    match (best, worst) {
        (Some(best), Some(worst)) => AllocationResult { best, worst },
        _ => AllocationResult::ineligible(),
    }
}

/// Highest level in range whose CP fits under the cap.
fn best_level_for(
    base: BaseStats,
    ivs: Ivs,
    cap: Option<u32>,
    levels: LevelRange,
) -> Option<StatAllocation> {
    match cap {
        None => Some(StatAllocation::compute(base, ivs, levels.max)),
        Some(cap) => levels
            .descending()
            .map(|level| StatAllocation::compute(base, ivs, level))
            .find(|stats| stats.cp <= cap),
    }
}

fn compare_keys(a: &(f64, i64), b: &(f64, i64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Orders candidates of one group so the preferred one is smallest.
fn rank_within_group(a: &StatAllocation, b: &StatAllocation) -> Ordering {
    b.stat_product()
        .total_cmp(&a.stat_product())
        .then(a.ivs.attack.cmp(&b.ivs.attack))
        .then(b.hp.cmp(&a.hp))
        .then(b.defense.total_cmp(&a.defense))
        .then(a.cp.cmp(&b.cp))
}
