//! Damage calculation for trainer battles.
//!
//! Damage depends on move power, the attacker's and defender's effective
//! stats after stage multipliers, STAB and type effectiveness. There are no
//! random rolls or critical hits.

mod effectiveness;
mod formula;

pub use effectiveness::{move_multiplier, stab_multiplier};
pub use formula::{calculate_damage, PVP_BONUS, STAB_BONUS};

use crate::effectiveness::EffectivenessTable;
use crate::entities::Combatant;
use crate::state::BattleState;
use crate::types::Type;

/// Damage `attacker` deals to the opposing side with a move, using the
/// stages currently stored in `state`.
#[inline]
pub fn damage(
    table: &EffectivenessTable,
    state: &BattleState,
    attacker_side: usize,
    attacker: &Combatant,
    defender: &Combatant,
    power: u16,
    move_type: Type,
) -> u16 {
    let defender_side = BattleState::opponent(attacker_side);
    let attack = attacker.attack * state.attack_multiplier(attacker_side);
    let defense = defender.defense * state.defense_multiplier(defender_side);
    let mult = move_multiplier(table, move_type, attacker.types, defender.types);
    calculate_damage(power, attack, defense, 1.0, mult)
}
