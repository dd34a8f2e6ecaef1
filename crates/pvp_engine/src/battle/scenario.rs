//! Battle scenarios: starting shields and energy for each side.

use std::fs;
use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::entities::FastMove;
use crate::error::DataError;
use crate::state::{MAX_ENERGY, SIDES};

/// Name suffix that turns on baiting for the first combatant.
pub const BAITED_SUFFIX: &str = "-baited";

bitflags! {
    /// Scenario properties derived from its configuration.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScenarioFlags: u8 {
        /// Swapping the sides yields the mirrored battle
        const SYMMETRIC = 1 << 0;
        /// The first combatant throws full-damage moves into shields
        const BAIT_FIRST = 1 << 1;
    }
}

/// Starting energy for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyStart {
    Fixed(u8),
    /// Energy from this many uses of the side's fast move
    FastCycles(u8),
}

impl Default for EnergyStart {
    fn default() -> Self {
        EnergyStart::Fixed(0)
    }
}

impl EnergyStart {
    /// Concrete energy for a combatant with `fast`, capped at 100.
    pub fn resolve(self, fast: &FastMove) -> u8 {
        let energy = match self {
            EnergyStart::Fixed(energy) => energy as u32,
            EnergyStart::FastCycles(cycles) => cycles as u32 * fast.energy_gain as u32,
        };
        energy.min(MAX_ENERGY as u32) as u8
    }
}

/// Scenario as written in configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub name: String,
    pub shields: [u8; SIDES],
    #[serde(default)]
    pub energy: [EnergyStart; SIDES],
}

/// A validated scenario.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scenario {
    pub name: String,
    pub shields: [u8; SIDES],
    pub energy: [EnergyStart; SIDES],
    pub flags: ScenarioFlags,
}

impl Scenario {
    pub fn new(name: &str, shields: [u8; SIDES], energy: [EnergyStart; SIDES]) -> Self {
        let mut flags = ScenarioFlags::empty();
        if name.ends_with(BAITED_SUFFIX) {
            flags |= ScenarioFlags::BAIT_FIRST;
        }
        if shields[0] == shields[1] && energy[0] == energy[1] && !flags.contains(ScenarioFlags::BAIT_FIRST) {
            flags |= ScenarioFlags::SYMMETRIC;
        }
        Self {
            name: name.to_string(),
            shields,
            energy,
            flags,
        }
    }

    /// Both sides start empty.
    pub fn even(name: &str, shields: [u8; SIDES]) -> Self {
        Self::new(name, shields, [EnergyStart::default(); SIDES])
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.flags.contains(ScenarioFlags::SYMMETRIC)
    }

    /// Whether `side` baits shields.
    #[inline]
    pub fn baits(&self, side: usize) -> bool {
        side == 0 && self.flags.contains(ScenarioFlags::BAIT_FIRST)
    }
}

impl From<ScenarioDef> for Scenario {
    fn from(def: ScenarioDef) -> Self {
        Scenario::new(&def.name, def.shields, def.energy)
    }
}

impl From<&Scenario> for ScenarioDef {
    fn from(s: &Scenario) -> Self {
        ScenarioDef {
            name: s.name.clone(),
            shields: s.shields,
            energy: s.energy,
        }
    }
}

/// The standard scenario set.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::even("leads", [1, 1]),
        Scenario::even("closers", [0, 0]),
        Scenario::even("attackers", [0, 1]),
        Scenario::new(
            "switches",
            [1, 1],
            [EnergyStart::FastCycles(6), EnergyStart::Fixed(0)],
        ),
        Scenario::even("leads-baited", [1, 1]),
    ]
}

pub fn scenarios_from_json(json: &str) -> Result<Vec<Scenario>, DataError> {
    let defs: Vec<ScenarioDef> = serde_json::from_str(json)?;
    Ok(defs.into_iter().map(Scenario::from).collect())
}

pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, DataError> {
    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    scenarios_from_json(&json)
}
