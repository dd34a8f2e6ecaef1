//! Charged-move decision policy.
//!
//! Every function here is pure: it reads a state snapshot and returns a
//! decision without mutating anything.

use crate::damage;
use crate::state::{BattleState, MAX_ENERGY};

use super::BattleContext;

/// Which charged move to fire now and which to save toward next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargedDecision {
    /// Slot fired this turn
    pub fire: u8,
    /// Slot saved toward afterwards
    pub aim: u8,
}

/// Damage a charged move from `side` would deal, before shields.
#[inline]
fn charged_damage(ctx: &BattleContext, state: &BattleState, side: usize, slot: usize) -> u16 {
    let attacker = ctx.combatants[side];
    let defender = ctx.combatants[BattleState::opponent(side)];
    let m = &attacker.charged[slot];
    damage::damage(ctx.table, state, side, attacker, defender, m.power, m.move_type)
}

/// Damage after a shield, if the defender has one.
#[inline]
pub fn shield_adjusted(state: &BattleState, defender: usize, damage: u16) -> u16 {
    if state.shields[defender] > 0 {
        1
    } else {
        damage
    }
}

/// Whether the opponent of `side`, after its next fast move, could afford a
/// charged move that knocks `side` out through its shields.
pub fn predict_lethal_threat(ctx: &BattleContext, state: &BattleState, side: usize) -> bool {
    let opp = BattleState::opponent(side);
    let threat = ctx.combatants[opp];
    let energy = state.energy[opp]
        .saturating_add(threat.fast.energy_gain)
        .min(MAX_ENERGY);

    threat
        .charged
        .iter()
        .enumerate()
        .filter(|(_, m)| m.energy_cost <= energy)
        .any(|(slot, _)| {
            let dmg = shield_adjusted(state, side, charged_damage(ctx, state, opp, slot));
            dmg >= state.hp[side]
        })
}

/// Pick a charged move for `side`. `None` if nothing is affordable.
pub fn choose_charged_move(ctx: &BattleContext, state: &BattleState, side: usize) -> Option<ChargedDecision> {
    let me = ctx.combatants[side];
    let opp = BattleState::opponent(side);
    let energy = state.energy[side];
    let baiting = ctx.bait[side];

    let affordable = |slot: usize| me.charged[slot].energy_cost <= energy;
    if !(0..me.charged.len()).any(&affordable) {
        return None;
    }

    let scores: Vec<f64> = (0..me.charged.len())
        .map(|slot| {
            let projected = if state.shields[opp] > 0 && !baiting {
                1
            } else {
                charged_damage(ctx, state, side, slot)
            };
            projected as f64 / me.charged[slot].energy_cost.max(1) as f64
        })
        .collect();

    let best_of = |slots: &mut dyn Iterator<Item = usize>| -> Option<usize> {
        slots.fold(None, |best: Option<usize>, slot| match best {
            Some(b) if scores[b] >= scores[slot] => Some(b),
            _ => Some(slot),
        })
    };

    let target = best_of(&mut (0..me.charged.len()))?;

    let fire = if predict_lethal_threat(ctx, state, side) {
        me.charged
            .iter()
            .enumerate()
            .filter(|(slot, _)| affordable(*slot))
            .min_by_key(|(slot, m)| (m.energy_cost, *slot))
            .map(|(slot, _)| slot)?
    } else if affordable(target) {
        target
    } else {
        match state.aim[side].map(|a| a as usize) {
            Some(aim) if aim < me.charged.len() && affordable(aim) => aim,
            _ => best_of(&mut (0..me.charged.len()).filter(|s| affordable(*s)))?,
        }
    };

    Some(ChargedDecision {
        fire: fire as u8,
        aim: target as u8,
    })
}
