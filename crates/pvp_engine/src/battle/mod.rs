//! Deterministic one-on-one battle simulation.
//!
//! A battle is a fold of [`step`] over a [`BattleState`] until one side
//! faints or the turn limit is reached. Each turn has two phases:
//!
//! 1. **Fast moves**: cooldowns tick down and every side at 0 attacks. Both
//!    hits are computed from the pre-turn state and land together.
//! 2. **Charged moves**: if nobody fainted, every side with enough energy for
//!    its cheapest charged move acts. The higher effective Attack goes first;
//!    an exact tie resolves both from the same snapshot and sums their
//!    stage buffs before clamping.
//!
//! The outcome is a rating in `[0, 1000]` from the first side's point of view.

mod policy;
mod scenario;

pub use policy::{choose_charged_move, predict_lethal_threat, shield_adjusted, ChargedDecision};
pub use scenario::{
    default_scenarios, load_scenarios, scenarios_from_json, EnergyStart, Scenario, ScenarioDef,
    ScenarioFlags, BAITED_SUFFIX,
};

use std::cmp::Ordering;

use serde::Serialize;

use crate::damage;
use crate::data::BuffTarget;
use crate::effectiveness::EffectivenessTable;
use crate::entities::Combatant;
use crate::state::{BattleState, SIDES};

/// Rating of an even result.
pub const EVEN_RATING: u16 = 500;

/// Highest rating.
pub const MAX_RATING: u16 = 1000;

/// Read-only inputs shared by every turn of one battle.
#[derive(Clone, Copy, Debug)]
pub struct BattleContext<'a> {
    pub combatants: [&'a Combatant; SIDES],
    pub table: &'a EffectivenessTable,
    /// Per side: throw full-damage moves into shields
    pub bait: [bool; SIDES],
}

impl<'a> BattleContext<'a> {
    pub fn new(
        first: &'a Combatant,
        second: &'a Combatant,
        table: &'a EffectivenessTable,
        bait: [bool; SIDES],
    ) -> Self {
        Self {
            combatants: [first, second],
            table,
            bait,
        }
    }

    pub fn for_scenario(
        first: &'a Combatant,
        second: &'a Combatant,
        table: &'a EffectivenessTable,
        scenario: &Scenario,
    ) -> Self {
        Self::new(first, second, table, [scenario.baits(0), scenario.baits(1)])
    }

    /// Starting state under a scenario.
    pub fn initial_state(&self, scenario: &Scenario) -> BattleState {
        let mut state = BattleState::new();
        for (side, combatant) in self.combatants.iter().enumerate() {
            let energy = scenario.energy[side].resolve(&combatant.fast);
            combatant.spawn(&mut state, side, scenario.shields[side], energy);
        }
        state
    }

    /// Attack stat times the current stage multiplier.
    #[inline]
    fn effective_attack(&self, state: &BattleState, side: usize) -> f64 {
        self.combatants[side].attack * state.attack_multiplier(side)
    }

    #[inline]
    fn can_charge(&self, state: &BattleState, side: usize) -> bool {
        self.combatants[side]
            .cheapest_charged_cost()
            .map_or(false, |cost| state.energy[side] >= cost)
    }
}

/// Result of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BattleOutcome {
    /// 0..=1000, 500 is even
    pub rating: u16,
    pub turns: u16,
    #[serde(skip)]
    pub state: BattleState,
}

/// Rating for a terminal state from the first side's point of view.
pub fn rating(state: &BattleState) -> u16 {
    let diff = state.hp_fraction(0) - state.hp_fraction(1);
    let rating = EVEN_RATING as i32 + (EVEN_RATING as f64 * diff).trunc() as i32;
    rating.clamp(0, MAX_RATING as i32) as u16
}

/// Advance one turn.
pub fn step(state: BattleState, ctx: &BattleContext) -> BattleState {
    let mut next = state;
    next.turn += 1;

    // Fast moves
    let mut fired = [false; SIDES];
    for side in 0..SIDES {
        next.cooldown[side] = next.cooldown[side].saturating_sub(1);
        fired[side] = next.cooldown[side] == 0;
    }
    let mut hits = [0u16; SIDES];
    for side in 0..SIDES {
        if fired[side] {
            let fast = &ctx.combatants[side].fast;
            hits[side] = damage::damage(
                ctx.table,
                &state,
                side,
                ctx.combatants[side],
                ctx.combatants[BattleState::opponent(side)],
                fast.power,
                fast.move_type,
            );
        }
    }
    for side in 0..SIDES {
        if fired[side] {
            let fast = &ctx.combatants[side].fast;
            next.take_damage(BattleState::opponent(side), hits[side]);
            next.gain_energy(side, fast.energy_gain);
            next.cooldown[side] = fast.turns.max(1);
        }
    }

    if next.is_fainted(0) || next.is_fainted(1) {
        return next;
    }

    // Charged moves
    match (ctx.can_charge(&next, 0), ctx.can_charge(&next, 1)) {
        (true, true) => {
            let order = ctx
                .effective_attack(&next, 0)
                .total_cmp(&ctx.effective_attack(&next, 1));
            match order {
                Ordering::Equal => {
                    let pre = next;
                    let mut shifts = [[0i8; 2]; SIDES];
                    for side in 0..SIDES {
                        if let Some((target, attack, defense)) =
                            resolve_charged(&pre, &mut next, ctx, side)
                        {
                            shifts[target][0] = shifts[target][0].saturating_add(attack);
                            shifts[target][1] = shifts[target][1].saturating_add(defense);
                        }
                    }
                    // Summed per target, clamped once
                    for (side, [attack, defense]) in shifts.into_iter().enumerate() {
                        next.apply_stages(side, attack, defense);
                    }
                }
                _ => {
                    let first = if order == Ordering::Greater { 0 } else { 1 };
                    let second = BattleState::opponent(first);
                    fire_charged(&mut next, ctx, first);
                    if !next.is_fainted(second) {
                        fire_charged(&mut next, ctx, second);
                    }
                }
            }
        }
        (true, false) => fire_charged(&mut next, ctx, 0),
        (false, true) => fire_charged(&mut next, ctx, 1),
        (false, false) => {}
    }

    next
}

/// Stage shift left by a charged move: (target side, attack, defense).
type StageShift = (usize, i8, i8);

/// Resolve one charged move against the current state, buffs included.
fn fire_charged(state: &mut BattleState, ctx: &BattleContext, side: usize) {
    let pre = *state;
    if let Some((target, attack, defense)) = resolve_charged(&pre, state, ctx, side) {
        state.apply_stages(target, attack, defense);
    }
}

/// Decide from `pre` and write the effects of one charged move into `out`.
///
/// Stage buffs are returned instead of applied.
fn resolve_charged(
    pre: &BattleState,
    out: &mut BattleState,
    ctx: &BattleContext,
    side: usize,
) -> Option<StageShift> {
    let decision = choose_charged_move(ctx, pre, side)?;
    let attacker = ctx.combatants[side];
    let m = attacker.charged_move(decision.fire)?;
    let opp = BattleState::opponent(side);

    let raw = damage::damage(
        ctx.table,
        pre,
        side,
        attacker,
        ctx.combatants[opp],
        m.power,
        m.move_type,
    );
    let dealt = shield_adjusted(pre, opp, raw);
    if pre.shields[opp] > 0 {
        out.shields[opp] = out.shields[opp].saturating_sub(1);
    }

    out.spend_energy(side, m.energy_cost);
    out.take_damage(opp, dealt);
    out.aim[side] = Some(decision.aim);

    m.buffs.map(|buffs| {
        let target = match buffs.target {
            BuffTarget::User => side,
            BuffTarget::Opponent => opp,
        };
        (target, buffs.attack, buffs.defense)
    })
}

/// Run a full battle between two combatants.
pub fn simulate(
    first: &Combatant,
    second: &Combatant,
    scenario: &Scenario,
    table: &EffectivenessTable,
) -> BattleOutcome {
    let ctx = BattleContext::for_scenario(first, second, table, scenario);
    let mut state = ctx.initial_state(scenario);
    while !state.is_over() {
        state = step(state, &ctx);
    }
    BattleOutcome {
        rating: rating(&state),
        turns: state.turn,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MoveBuffs;
    use crate::effectiveness::TypePair;
    use crate::entities::{ChargedMove, FastMove};
    use crate::types::Type;

    fn combatant(attack: f64, hp: u16, charged: Vec<ChargedMove>) -> Combatant {
        Combatant {
            types: TypePair::single(Type::Normal),
            attack,
            defense: 100.0,
            hp,
            fast: FastMove::new(Type::Fighting, 4, 2, 8),
            charged,
        }
    }

    #[test]
    fn test_rating_bounds() {
        let mut state = BattleState::new();
        state.max_hp = [100, 100];
        state.hp = [100, 0];
        assert_eq!(rating(&state), 1000);
        state.hp = [0, 100];
        assert_eq!(rating(&state), 0);
        state.hp = [0, 0];
        assert_eq!(rating(&state), 500);
        state.hp = [33, 0];
        assert_eq!(rating(&state), 665);
        state.hp = [0, 33];
        assert_eq!(rating(&state), 335);
    }

    #[test]
    fn test_first_fast_move_lands_on_turn_one() {
        let table = EffectivenessTable::new();
        let a = combatant(100.0, 200, vec![]);
        let b = combatant(100.0, 200, vec![]);
        let ctx = BattleContext::new(&a, &b, &table, [false, false]);
        let state = ctx.initial_state(&Scenario::even("closers", [0, 0]));

        let next = step(state, &ctx);
        assert_eq!(next.turn, 1);
        assert!(next.hp[0] < 200);
        assert!(next.hp[1] < 200);
        assert_eq!(next.energy, [8, 8]);
        assert_eq!(next.cooldown, [2, 2]);

        let next = step(next, &ctx);
        assert_eq!(next.energy, [8, 8]);
        let next = step(next, &ctx);
        assert_eq!(next.energy, [16, 16]);
    }

    #[test]
    fn test_faster_attacker_charges_first() {
        let table = EffectivenessTable::new();
        let nuke = ChargedMove::new(Type::Normal, 300, 40);
        let a = combatant(200.0, 50, vec![nuke]);
        let b = combatant(100.0, 50, vec![nuke]);
        let ctx = BattleContext::new(&a, &b, &table, [false, false]);

        let mut state = ctx.initial_state(&Scenario::even("closers", [0, 0]));
        state.energy = [40, 40];
        state.cooldown = [5, 5];
        let next = step(state, &ctx);

        assert_eq!(next.hp[1], 0);
        assert_eq!(next.hp[0], 50);
        assert_eq!(next.energy, [0, 40]);
    }

    #[test]
    fn test_equal_attack_charges_simultaneously() {
        let table = EffectivenessTable::new();
        let nuke = ChargedMove::new(Type::Normal, 300, 40);
        let a = combatant(100.0, 50, vec![nuke]);
        let b = combatant(100.0, 50, vec![nuke]);
        let ctx = BattleContext::new(&a, &b, &table, [false, false]);

        let mut state = ctx.initial_state(&Scenario::even("closers", [0, 0]));
        state.energy = [40, 40];
        state.cooldown = [5, 5];
        let next = step(state, &ctx);

        assert_eq!(next.hp, [0, 0]);
        assert_eq!(rating(&next), 500);
    }

    #[test]
    fn test_shield_blocks_and_buffs_apply() {
        let table = EffectivenessTable::new();
        let buff = ChargedMove::new(Type::Normal, 100, 40).with_buffs(MoveBuffs {
            attack: 1,
            defense: 0,
            target: BuffTarget::User,
        });
        let a = combatant(100.0, 200, vec![buff]);
        let b = combatant(100.0, 200, vec![]);
        let ctx = BattleContext::new(&a, &b, &table, [false, false]);

        let mut state = ctx.initial_state(&Scenario::even("leads", [1, 1]));
        state.energy = [40, 0];
        state.cooldown = [5, 5];
        let next = step(state, &ctx);

        assert_eq!(next.hp[1], 199);
        assert_eq!(next.shields, [1, 0]);
        assert_eq!(next.attack_stage[0], 1);
        assert_eq!(next.aim[0], Some(0));
    }

    #[test]
    fn test_simultaneous_buffs_clamp_once() {
        let table = EffectivenessTable::new();
        let harden = ChargedMove::new(Type::Normal, 10, 40).with_buffs(MoveBuffs {
            attack: 0,
            defense: 2,
            target: BuffTarget::User,
        });
        let crush = ChargedMove::new(Type::Normal, 10, 40).with_buffs(MoveBuffs {
            attack: 0,
            defense: -1,
            target: BuffTarget::Opponent,
        });
        let a = combatant(100.0, 500, vec![harden]);
        let b = combatant(100.0, 500, vec![crush]);

        let forward = BattleContext::new(&a, &b, &table, [false, false]);
        let mut state = forward.initial_state(&Scenario::even("closers", [0, 0]));
        state.energy = [40, 40];
        state.cooldown = [5, 5];
        state.defense_stage = [3, 0];
        let next = step(state, &forward);
        assert_eq!(next.defense_stage, [4, 0]);

        let backward = BattleContext::new(&b, &a, &table, [false, false]);
        let mut state = backward.initial_state(&Scenario::even("closers", [0, 0]));
        state.energy = [40, 40];
        state.cooldown = [5, 5];
        state.defense_stage = [0, 3];
        let next = step(state, &backward);
        assert_eq!(next.defense_stage, [0, 4]);
    }

    #[test]
    fn test_simulate_terminates() {
        let table = EffectivenessTable::new();
        let a = combatant(120.0, 150, vec![ChargedMove::new(Type::Normal, 60, 45)]);
        let b = combatant(100.0, 150, vec![ChargedMove::new(Type::Normal, 60, 45)]);
        let outcome = simulate(&a, &b, &default_scenarios()[0], &table);
        assert!(outcome.state.is_over());
        assert!(outcome.rating > 500);
        assert!(outcome.turns <= crate::state::TURN_LIMIT);
    }
}
