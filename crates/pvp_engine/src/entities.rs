//! Combatant blueprints for spawning creatures into battle.
//!
//! `CombatantConfig` is a builder that turns a stat allocation plus a chosen
//! moveset into an immutable `Combatant`. The combatant carries everything the
//! simulator reads but never mutates; `spawn()` writes its starting counters
//! into a `BattleState` slot.

use crate::allocation::StatAllocation;
use crate::data::{Move, MoveBuffs, MoveKind};
use crate::effectiveness::TypePair;
use crate::state::{BattleState, MAX_ENERGY};
use crate::types::Type;

/// Attack multiplier for shadow variants
pub const SHADOW_ATTACK_BONUS: f64 = 1.2;

/// Defense multiplier for shadow variants
pub const SHADOW_DEFENSE_PENALTY: f64 = 5.0 / 6.0;

/// Most charged moves a combatant carries
pub const MAX_CHARGED_MOVES: usize = 2;

/// Fast move as the simulator sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastMove {
    pub move_type: Type,
    pub power: u16,
    /// Cooldown in turns (at least 1)
    pub turns: u8,
    pub energy_gain: u8,
}

impl FastMove {
    pub const fn new(move_type: Type, power: u16, turns: u8, energy_gain: u8) -> Self {
        Self {
            move_type,
            power,
            turns,
            energy_gain,
        }
    }

    /// `None` unless `m` is a fast move.
    pub fn from_move(m: &Move) -> Option<Self> {
        match m.kind {
            MoveKind::Fast { turns, energy_gain } => {
                Some(Self::new(m.move_type, m.power, turns.max(1), energy_gain))
            }
            MoveKind::Charged { .. } => None,
        }
    }
}

/// Charged move as the simulator sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargedMove {
    pub move_type: Type,
    pub power: u16,
    pub energy_cost: u8,
    pub buffs: Option<MoveBuffs>,
}

impl ChargedMove {
    pub const fn new(move_type: Type, power: u16, energy_cost: u8) -> Self {
        Self {
            move_type,
            power,
            energy_cost,
            buffs: None,
        }
    }

    pub const fn with_buffs(mut self, buffs: MoveBuffs) -> Self {
        self.buffs = Some(buffs);
        self
    }

    /// `None` unless `m` is a charged move.
    pub fn from_move(m: &Move) -> Option<Self> {
        match m.kind {
            MoveKind::Charged { energy_cost } => Some(Self {
                move_type: m.move_type,
                power: m.power,
                energy_cost: energy_cost.min(MAX_ENERGY),
                buffs: m.buffs,
            }),
            MoveKind::Fast { .. } => None,
        }
    }
}

/// Immutable battle participant.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub types: TypePair,
    /// Effective Attack (shadow bonus applied)
    pub attack: f64,
    /// Effective Defense (shadow penalty applied)
    pub defense: f64,
    pub hp: u16,
    pub fast: FastMove,
    pub charged: Vec<ChargedMove>,
}

impl Combatant {
    /// Lowest energy cost among charged moves.
    #[inline]
    pub fn cheapest_charged_cost(&self) -> Option<u8> {
        self.charged.iter().map(|m| m.energy_cost).min()
    }

    /// Index of the cheapest charged move, earliest on ties.
    pub fn cheapest_charged(&self) -> Option<usize> {
        self.charged
            .iter()
            .enumerate()
            .min_by_key(|(i, m)| (m.energy_cost, *i))
            .map(|(i, _)| i)
    }

    #[inline]
    pub fn charged_move(&self, slot: u8) -> Option<&ChargedMove> {
        self.charged.get(slot as usize)
    }

    /// Write this combatant's starting counters into `side`.
    ///
    /// The fast-move cooldown starts at 0 so the first fast move lands on turn 1.
    pub fn spawn(&self, state: &mut BattleState, side: usize, shields: u8, energy: u8) {
        state.hp[side] = self.hp;
        state.max_hp[side] = self.hp;
        state.energy[side] = energy.min(MAX_ENERGY);
        state.attack_stage[side] = 0;
        state.defense_stage[side] = 0;
        state.cooldown[side] = 0;
        state.shields[side] = shields;
        state.aim[side] = None;
    }
}

/// Blueprint for a `Combatant`.
///
/// Use builder methods to customize, then call `build()`.
#[derive(Clone, Debug)]
pub struct CombatantConfig {
    /// Typing (determines STAB and what resists it)
    pub types: TypePair,

    /// Allocated stats for the league
    pub stats: StatAllocation,

    /// Shadow variant
    pub shadow: bool,

    pub fast: FastMove,

    pub charged: Vec<ChargedMove>,
}

impl CombatantConfig {
    pub fn new(types: TypePair, stats: StatAllocation, fast: FastMove) -> Self {
        Self {
            types,
            stats,
            shadow: false,
            fast,
            charged: Vec::with_capacity(MAX_CHARGED_MOVES),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Add a charged move; extras beyond two are ignored.
    pub fn charged_move(mut self, m: ChargedMove) -> Self {
        if self.charged.len() < MAX_CHARGED_MOVES {
            self.charged.push(m);
        }
        self
    }

    pub fn build(&self) -> Combatant {
        let (atk_mod, def_mod) = if self.shadow {
            (SHADOW_ATTACK_BONUS, SHADOW_DEFENSE_PENALTY)
        } else {
            (1.0, 1.0)
        };

        Combatant {
            types: self.types,
            attack: self.stats.attack * atk_mod,
            defense: self.stats.defense * def_mod,
            hp: self.stats.hp.min(u16::MAX as u32) as u16,
            fast: self.fast,
            charged: self.charged.clone(),
        }
    }
}
