//! Per-level combat power multipliers.
//!
//! Levels advance in half steps from 1.0 to 50.5; `Level(0)` is level 1.0.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of half-step levels in the table.
pub const LEVEL_COUNT: usize = 100;

/// Multiplier per level, index = (level - 1) * 2.
pub static CP_MULTIPLIERS: [f64; LEVEL_COUNT] = [
    0.094, 0.1351374318, 0.16639787, 0.192650919, 0.21573247, // 1.0 - 3.0
    0.2365726613, 0.25572005, 0.2735303812, 0.29024988, 0.3060573775, // 3.5 - 5.5
    0.3210876, 0.3354450362, 0.34921268, 0.3624577511, 0.3752356, // 6.0 - 8.0
    0.387592416, 0.39956728, 0.4111935514, 0.4225, 0.4329264091, // 8.5 - 10.5
    0.44310755, 0.4530599591, 0.4627984, 0.472336093, 0.48168495, // 11.0 - 13.0
    0.4908558003, 0.49985844, 0.508701765, 0.51739395, 0.5259425113, // 13.5 - 15.5
    0.5343543, 0.5426357375, 0.5507927, 0.5588305862, 0.5667545, // 16.0 - 18.0
    0.5745691333, 0.5822789, 0.5898879072, 0.5974, 0.6048236651, // 18.5 - 20.5
    0.6121573, 0.6194041216, 0.6265671, 0.6336491432, 0.64065295, // 21.0 - 23.0
    0.6475809666, 0.65443563, 0.6612192524, 0.667934, 0.6745818959, // 23.5 - 25.5
    0.6811649, 0.6876849038, 0.69414365, 0.70054287, 0.7068842, // 26.0 - 28.0
    0.7131691091, 0.7193991, 0.7255756136, 0.7317, 0.7347410093, // 28.5 - 30.5
    0.7377695, 0.7407855938, 0.74378943, 0.7467812109, 0.74976104, // 31.0 - 33.0
    0.7527290867, 0.75568551, 0.7586303683, 0.76156384, 0.7644860647, // 33.5 - 35.5
    0.76739717, 0.7702972656, 0.7731865, 0.7760649616, 0.77893275, // 36.0 - 38.0
    0.7817900548, 0.78463697, 0.7874736075, 0.79030001, 0.792803968, // 38.5 - 40.5
    0.79530001, 0.797800015, 0.8003, 0.802799995, 0.8053, // 41.0 - 43.0
    0.8078, 0.81029999, 0.812799985, 0.81529999, 0.81779999, // 43.5 - 45.5
    0.82029999, 0.82279999, 0.82529999, 0.82779999, 0.83029999, // 46.0 - 48.0
    0.83279999, 0.83529999, 0.83779999, 0.84029999, 0.84279999, // 48.5 - 50.5
];

/// A power level in half steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(0);
    /// Level 50.0, the default cap.
    pub const DEFAULT_MAX: Level = Level(98);
    pub const MAX: Level = Level((LEVEL_COUNT - 1) as u8);

    /// Level from a table index, clamped into range.
    pub fn from_index(index: usize) -> Self {
        Level(index.min(LEVEL_COUNT - 1) as u8)
    }

    /// Nearest half step at or below `value`, clamped into the table.
    pub fn from_value(value: f32) -> Self {
        if !value.is_finite() || value <= 1.0 {
            return Self::MIN;
        }
        Self::from_index(((value - 1.0) * 2.0).floor() as usize)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn value(self) -> f32 {
        1.0 + self.0 as f32 / 2.0
    }

    #[inline]
    pub fn multiplier(self) -> f64 {
        CP_MULTIPLIERS[self.index()]
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.value())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f32::deserialize(deserializer).map(Level::from_value)
    }
}

/// Inclusive level bounds for the allocator's scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRange {
    pub min: Level,
    pub max: Level,
}

impl Default for LevelRange {
    fn default() -> Self {
        Self {
            min: Level::MIN,
            max: Level::DEFAULT_MAX,
        }
    }
}

impl LevelRange {
    pub fn new(min: Level, max: Level) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Range from level 1 up to `max`.
    pub fn up_to(max: Level) -> Self {
        Self::new(Level::MIN, max)
    }

    /// Levels from highest to lowest.
    pub fn descending(self) -> impl Iterator<Item = Level> {
        (self.min.index()..=self.max.index()).rev().map(Level::from_index)
    }
}
