//! Battle state representation using Struct-of-Arrays (SoA) layout.
//!
//! This module defines the core `BattleState` which holds every mutable
//! counter of a two-combatant battle in a small, stack-allocated `Copy`
//! struct. Turn resolution takes the state by value and returns the next one.

/// Number of combatants in a battle
pub const SIDES: usize = 2;

/// Energy ceiling
pub const MAX_ENERGY: u8 = 100;

/// Hard stop for a battle
pub const TURN_LIMIT: u16 = 600;

/// Lowest stat stage
pub const MIN_STAGE: i8 = -4;

/// Highest stat stage
pub const MAX_STAGE: i8 = 4;

/// Multipliers for stages -4..=+4
pub const STAGE_MULTIPLIERS: [f64; 9] = [
    0.5,
    4.0 / 7.0,
    2.0 / 3.0,
    0.8,
    1.0,
    1.25,
    1.5,
    1.75,
    2.0,
];

// ============================================================================
// Battle State
// ============================================================================

/// Core battle state in Struct-of-Arrays layout.
///
/// Index 0 is the combatant being evaluated, index 1 its opponent.
///
/// This struct is `Copy` so prediction code can inspect hypothetical
/// turns without touching the live state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleState {
    /// Current HP
    pub hp: [u16; SIDES],

    /// Maximum HP
    pub max_hp: [u16; SIDES],

    /// Current energy (0-100)
    pub energy: [u8; SIDES],

    /// Attack stage (-4 to +4)
    pub attack_stage: [i8; SIDES],

    /// Defense stage (-4 to +4)
    pub defense_stage: [i8; SIDES],

    /// Turns until the next fast move lands
    pub cooldown: [u8; SIDES],

    /// Shields remaining
    pub shields: [u8; SIDES],

    /// Charged move slot each side is saving toward
    pub aim: [Option<u8>; SIDES],

    /// Elapsed turns
    pub turn: u16,
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleState {
    /// Create an empty battle state
    pub const fn new() -> Self {
        Self {
            hp: [0; SIDES],
            max_hp: [0; SIDES],
            energy: [0; SIDES],
            attack_stage: [0; SIDES],
            defense_stage: [0; SIDES],
            cooldown: [0; SIDES],
            shields: [0; SIDES],
            aim: [None; SIDES],
            turn: 0,
        }
    }

    /// Index of the other combatant
    #[inline]
    pub const fn opponent(side: usize) -> usize {
        debug_assert!(side < SIDES);
        1 - side
    }

    /// Check if a combatant is fainted
    #[inline]
    pub const fn is_fainted(&self, side: usize) -> bool {
        self.hp[side] == 0
    }

    /// Battle ends on any faint or at the turn limit
    #[inline]
    pub const fn is_over(&self) -> bool {
        self.hp[0] == 0 || self.hp[1] == 0 || self.turn >= TURN_LIMIT
    }

    /// Remaining HP as a fraction of max HP
    #[inline]
    pub fn hp_fraction(&self, side: usize) -> f64 {
        if self.max_hp[side] == 0 {
            return 0.0;
        }
        self.hp[side] as f64 / self.max_hp[side] as f64
    }

    /// Subtract damage, flooring HP at 0
    #[inline]
    pub fn take_damage(&mut self, side: usize, damage: u16) {
        self.hp[side] = self.hp[side].saturating_sub(damage);
    }

    /// Add energy, capped at 100
    #[inline]
    pub fn gain_energy(&mut self, side: usize, amount: u8) {
        self.energy[side] = self.energy[side].saturating_add(amount).min(MAX_ENERGY);
    }

    /// Remove energy, flooring at 0
    #[inline]
    pub fn spend_energy(&mut self, side: usize, amount: u8) {
        self.energy[side] = self.energy[side].saturating_sub(amount);
    }

    /// Shift stat stages, clamped to -4..=+4
    #[inline]
    pub fn apply_stages(&mut self, side: usize, attack: i8, defense: i8) {
        self.attack_stage[side] = shift_stage(self.attack_stage[side], attack);
        self.defense_stage[side] = shift_stage(self.defense_stage[side], defense);
    }

    /// Attack multiplier from the current stage
    #[inline]
    pub fn attack_multiplier(&self, side: usize) -> f64 {
        stage_multiplier(self.attack_stage[side])
    }

    /// Defense multiplier from the current stage
    #[inline]
    pub fn defense_multiplier(&self, side: usize) -> f64 {
        stage_multiplier(self.defense_stage[side])
    }
}

#[inline]
fn shift_stage(current: i8, delta: i8) -> i8 {
    current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE)
}

/// Map a stat stage to its multiplier.
/// Stages outside -4..=+4 are clamped.
#[inline]
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
    STAGE_MULTIPLIERS[(stage - MIN_STAGE) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<BattleState>();
    }

    #[test]
    fn test_opponent() {
        assert_eq!(BattleState::opponent(0), 1);
        assert_eq!(BattleState::opponent(1), 0);
    }

    #[test]
    fn test_stage_multiplier() {
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(stage_multiplier(1), 1.25);
        assert_eq!(stage_multiplier(4), 2.0);
        assert_eq!(stage_multiplier(-4), 0.5);
        assert_eq!(stage_multiplier(-1), 0.8);
        assert_eq!(stage_multiplier(9), 2.0);
        assert_eq!(stage_multiplier(-100), 0.5);
    }

    #[test]
    fn test_counters_are_bounded() {
        let mut state = BattleState::new();
        state.hp = [10, 10];
        state.max_hp = [10, 10];

        state.take_damage(0, 500);
        assert_eq!(state.hp[0], 0);
        assert!(state.is_fainted(0));
        assert!(state.is_over());

        state.gain_energy(1, 90);
        state.gain_energy(1, 90);
        assert_eq!(state.energy[1], MAX_ENERGY);
        state.spend_energy(1, 255);
        assert_eq!(state.energy[1], 0);

        state.apply_stages(1, 7, -9);
        assert_eq!(state.attack_stage[1], MAX_STAGE);
        assert_eq!(state.defense_stage[1], MIN_STAGE);
    }

    #[test]
    fn test_hp_fraction_handles_zero_max() {
        let state = BattleState::new();
        assert_eq!(state.hp_fraction(0), 0.0);
    }
}
