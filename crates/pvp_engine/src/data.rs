//! Normalized input records: creatures, moves and league rules.
//!
//! The data feed is deserialized into loose `*Record` structs first. Each
//! record is then validated into its typed form; invalid records are logged
//! and skipped so one bad entry never aborts a run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{BaseStats, Level, LevelRange};
use crate::effectiveness::TypePair;
use crate::error::DataError;
use crate::types::Type;

// ============================================================================
// Moves
// ============================================================================

/// Who receives a move's stage change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuffTarget {
    #[serde(rename = "self")]
    User,
    Opponent,
}

/// Stage change applied after a charged move hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBuffs {
    #[serde(default)]
    pub attack: i8,
    #[serde(default)]
    pub defense: i8,
    pub target: BuffTarget,
}

/// Raw move record from the data feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub power: u16,
    /// Energy gained (fast) or spent (charged); the sign is ignored.
    #[serde(default)]
    pub energy: i16,
    /// Cooldown in turns; present only on fast moves.
    #[serde(default)]
    pub turns: Option<u8>,
    #[serde(default)]
    pub buffs: Option<MoveBuffs>,
    #[serde(default = "certain")]
    pub buff_chance: f64,
}

fn certain() -> f64 {
    1.0
}

/// Fast or charged, with the kind-specific numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Fast { turns: u8, energy_gain: u8 },
    Charged { energy_cost: u8 },
}

/// A validated move.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    pub id: String,
    pub move_type: Type,
    pub power: u16,
    pub kind: MoveKind,
    /// Only guaranteed effects are kept.
    pub buffs: Option<MoveBuffs>,
}

impl Move {
    #[inline]
    pub fn is_fast(&self) -> bool {
        matches!(self.kind, MoveKind::Fast { .. })
    }

    #[inline]
    pub fn is_charged(&self) -> bool {
        matches!(self.kind, MoveKind::Charged { .. })
    }
}

impl TryFrom<MoveRecord> for Move {
    type Error = DataError;

    fn try_from(record: MoveRecord) -> Result<Self, Self::Error> {
        let move_type = Type::from_str(&record.move_type)
            .ok_or_else(|| DataError::UnknownType(record.move_type.clone()))?;
        let energy = record.energy.unsigned_abs().min(u8::MAX as u16) as u8;

        let kind = match record.turns {
            Some(0) => return Err(DataError::InvalidMove(record.id, "zero-turn fast move")),
            Some(turns) => MoveKind::Fast {
                turns,
                energy_gain: energy,
            },
            None if energy == 0 => {
                return Err(DataError::InvalidMove(record.id, "charged move without cost"))
            }
            None => MoveKind::Charged {
                energy_cost: energy,
            },
        };

        let buffs = record.buffs.filter(|_| record.buff_chance >= 1.0);

        Ok(Self {
            id: record.id,
            move_type,
            power: record.power,
            kind,
            buffs,
        })
    }
}

// ============================================================================
// Creatures
// ============================================================================

/// Raw creature record from the data feed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub species: String,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub dex: u16,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: Option<BaseStats>,
    #[serde(default)]
    pub fast_moves: Vec<String>,
    #[serde(default)]
    pub charged_moves: Vec<String>,
    /// Ids of the creatures this one evolves into
    #[serde(default)]
    pub evolutions: Vec<String>,
    #[serde(default)]
    pub shadow: bool,
}

/// A validated species (or form) entry.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseCreature {
    /// `species` or `species_form`
    pub id: String,
    pub species: String,
    pub form: Option<String>,
    pub dex: u16,
    pub types: TypePair,
    pub base_stats: BaseStats,
    pub fast_moves: Vec<String>,
    pub charged_moves: Vec<String>,
    pub evolutions: Vec<String>,
    pub shadow_available: bool,
}

/// Canonical id for a species and optional form.
pub fn creature_id(species: &str, form: Option<&str>) -> String {
    match form {
        Some(form) if !form.is_empty() => format!("{}_{}", species, form),
        _ => species.to_string(),
    }
}

impl TryFrom<CreatureRecord> for BaseCreature {
    type Error = DataError;

    fn try_from(record: CreatureRecord) -> Result<Self, Self::Error> {
        let id = creature_id(&record.species, record.form.as_deref());

        let base_stats = record
            .base_stats
            .filter(BaseStats::is_valid)
            .ok_or_else(|| DataError::MissingStats(id.clone()))?;

        let types = record
            .types
            .iter()
            .map(|name| Type::from_str(name).ok_or_else(|| DataError::UnknownType(name.clone())))
            .collect::<Result<Vec<Type>, DataError>>()?;
        let types = TypePair::from_types(&types)
            .ok_or_else(|| DataError::TypeCount(id.clone(), record.types.len()))?;

        if record.fast_moves.is_empty() {
            return Err(DataError::EmptyMovePool(id, "fast"));
        }
        if record.charged_moves.is_empty() {
            return Err(DataError::EmptyMovePool(id, "charged"));
        }

        Ok(Self {
            id,
            species: record.species,
            form: record.form,
            dex: record.dex,
            types,
            base_stats,
            fast_moves: record.fast_moves,
            charged_moves: record.charged_moves,
            evolutions: record.evolutions,
            shadow_available: record.shadow,
        })
    }
}

// ============================================================================
// Leagues
// ============================================================================

/// Allow-list entry; `form: None` admits every form of the species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedSpecies {
    pub species: String,
    #[serde(default)]
    pub form: Option<String>,
}

impl AllowedSpecies {
    pub fn matches(&self, creature: &BaseCreature) -> bool {
        self.species == creature.species
            && match &self.form {
                None => true,
                Some(form) => creature.form.as_deref() == Some(form.as_str()),
            }
    }
}

/// Eligibility rules and allocator bounds for one league or cup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueRule {
    pub id: String,
    /// `None` is uncapped
    #[serde(default)]
    pub cp_cap: Option<u32>,
    #[serde(default)]
    pub allowed_types: Option<Vec<Type>>,
    #[serde(default)]
    pub allowed_species: Option<Vec<AllowedSpecies>>,
    /// Creature ids or species names
    #[serde(default)]
    pub banned_species: Vec<String>,
    #[serde(default)]
    pub first_stage_only: bool,
    #[serde(default)]
    pub max_level: Option<Level>,
    #[serde(default)]
    pub iv_floor: u8,
    #[serde(default = "allow")]
    pub allow_shadows: bool,
}

fn allow() -> bool {
    true
}

impl LeagueRule {
    /// An open league with a CP cap and no other restrictions.
    pub fn capped(id: &str, cp_cap: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            cp_cap,
            allowed_types: None,
            allowed_species: None,
            banned_species: Vec::new(),
            first_stage_only: false,
            max_level: None,
            iv_floor: 0,
            allow_shadows: true,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.cp_cap.is_some()
    }

    pub fn level_range(&self) -> LevelRange {
        LevelRange::up_to(self.max_level.unwrap_or(Level::DEFAULT_MAX))
    }

    pub fn is_banned(&self, creature: &BaseCreature) -> bool {
        self.banned_species
            .iter()
            .any(|ban| *ban == creature.id || *ban == creature.species)
    }
}

// ============================================================================
// Game master
// ============================================================================

#[derive(Deserialize)]
struct RawGameMaster {
    #[serde(default)]
    pokemon: Vec<CreatureRecord>,
    #[serde(default)]
    moves: Vec<MoveRecord>,
    #[serde(default)]
    leagues: Vec<LeagueRule>,
}

/// All validated input for a ranking run.
#[derive(Clone, Debug, Default)]
pub struct GameMaster {
    pub creatures: Vec<BaseCreature>,
    pub moves: HashMap<String, Move>,
    pub leagues: Vec<LeagueRule>,
    /// Records dropped during validation
    pub skipped: usize,
}

impl GameMaster {
    /// Validate raw records, skipping the malformed ones.
    pub fn from_records(
        creatures: Vec<CreatureRecord>,
        moves: Vec<MoveRecord>,
        leagues: Vec<LeagueRule>,
    ) -> Self {
        let mut skipped = 0;

        let moves: HashMap<String, Move> = moves
            .into_iter()
            .filter_map(|record| match Move::try_from(record) {
                Ok(m) => Some((m.id.clone(), m)),
                Err(e) => {
                    log::warn!("Skipping move: {}", e);
                    skipped += 1;
                    None
                }
            })
            .collect();

        let creatures: Vec<BaseCreature> = creatures
            .into_iter()
            .filter_map(|record| match BaseCreature::try_from(record) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::warn!("Skipping creature: {}", e);
                    skipped += 1;
                    None
                }
            })
            .collect();

        log::debug!(
            "Loaded {} creatures, {} moves, {} leagues ({} records skipped)",
            creatures.len(),
            moves.len(),
            leagues.len(),
            skipped
        );

        Self {
            creatures,
            moves,
            leagues,
            skipped,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: RawGameMaster = serde_json::from_str(json)?;
        Ok(Self::from_records(raw.pokemon, raw.moves, raw.leagues))
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn league(&self, id: &str) -> Option<&LeagueRule> {
        self.leagues.iter().find(|l| l.id == id)
    }

    pub fn get_move(&self, id: &str) -> Option<&Move> {
        self.moves.get(id)
    }

    pub fn creature(&self, id: &str) -> Option<&BaseCreature> {
        self.creatures.iter().find(|c| c.id == id)
    }
}
