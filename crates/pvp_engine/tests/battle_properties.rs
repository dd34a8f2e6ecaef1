//! Battle simulator properties over default scenarios.

mod common;

use common::helpers::{combatant, counter};
use pvp_engine::battle::{default_scenarios, simulate, step, BattleContext, Scenario};
use pvp_engine::data::{BuffTarget, MoveBuffs};
use pvp_engine::effectiveness::{EffectivenessTable, TypePair};
use pvp_engine::entities::{ChargedMove, Combatant, FastMove};
use pvp_engine::state::{MAX_ENERGY, TURN_LIMIT};
use pvp_engine::types::Type;

fn roster() -> Vec<Combatant> {
    vec![
        combatant(140, counter(), vec![ChargedMove::new(Type::Fighting, 90, 50)]),
        Combatant {
            types: TypePair::new(Type::Water, Some(Type::Fairy)),
            attack: 90.0,
            defense: 130.0,
            hp: 190,
            fast: FastMove::new(Type::Water, 7, 3, 11),
            charged: vec![
                ChargedMove::new(Type::Ice, 90, 55),
                ChargedMove::new(Type::Fairy, 90, 60),
            ],
        },
        Combatant {
            types: TypePair::new(Type::Steel, Some(Type::Flying)),
            attack: 115.0,
            defense: 135.0,
            hp: 150,
            fast: FastMove::new(Type::Flying, 5, 2, 10),
            charged: vec![
                ChargedMove::new(Type::Flying, 45, 35),
                ChargedMove::new(Type::Steel, 75, 45),
            ],
        },
        combatant(80, FastMove::new(Type::Normal, 1, 1, 4), vec![]),
    ]
}

#[test]
fn ratings_stay_in_range() {
    let table = EffectivenessTable::new();
    let roster = roster();
    for scenario in default_scenarios() {
        for a in &roster {
            for b in &roster {
                let outcome = simulate(a, b, &scenario, &table);
                assert!(outcome.rating <= 1000, "{} rated {}", scenario.name, outcome.rating);
                assert!(outcome.turns <= TURN_LIMIT);
                assert!(outcome.state.is_over());
            }
        }
    }
}

#[test]
fn identical_combatants_tie() {
    let table = EffectivenessTable::new();
    for c in roster() {
        for scenario in default_scenarios().iter().filter(|s| s.is_symmetric()) {
            assert_eq!(simulate(&c, &c.clone(), scenario, &table).rating, 500);
        }
    }
}

#[test]
fn mirrored_battles_sum_to_1000() {
    let table = EffectivenessTable::new();
    let roster = roster();
    for scenario in default_scenarios().iter().filter(|s| s.is_symmetric()) {
        for (i, a) in roster.iter().enumerate() {
            for b in &roster[i + 1..] {
                let forward = simulate(a, b, scenario, &table).rating;
                let backward = simulate(b, a, scenario, &table).rating;
                assert_eq!(forward + backward, 1000, "{}", scenario.name);
            }
        }
    }
}

#[test]
fn mirrored_buff_battles_sum_to_1000() {
    let table = EffectivenessTable::new();
    let jab = FastMove::new(Type::Fighting, 7, 2, 8);
    let harden = ChargedMove::new(Type::Normal, 60, 40).with_buffs(MoveBuffs {
        attack: 0,
        defense: 2,
        target: BuffTarget::User,
    });
    let crush = ChargedMove::new(Type::Normal, 60, 40).with_buffs(MoveBuffs {
        attack: 0,
        defense: -1,
        target: BuffTarget::Opponent,
    });
    let a = combatant(2000, jab, vec![harden]);
    let b = combatant(2000, jab, vec![crush]);

    for scenario in default_scenarios().iter().filter(|s| s.is_symmetric()) {
        let forward = simulate(&a, &b, scenario, &table);
        let backward = simulate(&b, &a, scenario, &table);
        assert_eq!(forward.rating + backward.rating, 1000, "{}", scenario.name);
        assert_eq!(forward.state.defense_stage[0], backward.state.defense_stage[1]);
        assert_eq!(forward.state.hp[0], backward.state.hp[1]);
    }
}

#[test]
fn no_charged_moves_caps_energy() {
    let table = EffectivenessTable::new();
    let a = combatant(1000, counter(), vec![]);
    let b = a.clone();
    let outcome = simulate(&a, &b, &Scenario::even("leads", [1, 1]), &table);

    assert_eq!(outcome.state.energy, [MAX_ENERGY, MAX_ENERGY]);
    assert_eq!(outcome.state.shields, [1, 1]);
    assert_eq!(outcome.state.aim, [None, None]);
    assert_eq!(outcome.rating, 500);
}

#[test]
fn stalemate_ends_at_turn_limit() {
    let table = EffectivenessTable::new();
    // One damage every 5 turns: 120 hits in 600 turns
    let a = combatant(200, FastMove::new(Type::Normal, 0, 5, 0), vec![]);
    let outcome = simulate(&a, &a.clone(), &Scenario::even("closers", [0, 0]), &table);

    assert_eq!(outcome.turns, TURN_LIMIT);
    assert_eq!(outcome.state.hp, [80, 80]);
    assert_eq!(outcome.rating, 500);
}

#[test]
fn shield_absorbs_charged_move() {
    let table = EffectivenessTable::new();
    let a = combatant(150, counter(), vec![ChargedMove::new(Type::Normal, 100, 40)]);
    let b = combatant(150, counter(), vec![]);
    let ctx = BattleContext::new(&a, &b, &table, [false, false]);

    let mut state = ctx.initial_state(&Scenario::even("leads", [1, 1]));
    state.energy[0] = 40;
    state.cooldown = [3, 3];
    let next = step(state, &ctx);

    assert_eq!(next.hp[1], 149);
    assert_eq!(next.shields[1], 0);
    assert_eq!(next.energy[0], 0);

    // Second throw goes through unshielded
    let mut again = next;
    again.energy[0] = 40;
    again.cooldown = [3, 3];
    let after = step(again, &ctx);
    assert!(after.hp[1] < 149 - 1);
    assert_eq!(after.shields[1], 0);
}

#[test]
fn one_hit_takes_one_of_two_shields() {
    let table = EffectivenessTable::new();
    let a = combatant(150, counter(), vec![ChargedMove::new(Type::Normal, 100, 40)]);
    let b = combatant(150, counter(), vec![]);
    let ctx = BattleContext::new(&a, &b, &table, [false, false]);

    let mut state = ctx.initial_state(&Scenario::even("double-shield", [2, 2]));
    state.energy[0] = 40;
    state.cooldown = [3, 3];
    let next = step(state, &ctx);

    assert_eq!(next.hp[1], next.max_hp[1] - 1);
    assert_eq!(next.shields, [2, 1]);
    assert_eq!(next.energy[0], 0);
}

#[test]
fn switch_energy_favours_first_side() {
    let table = EffectivenessTable::new();
    let a = combatant(140, counter(), vec![ChargedMove::new(Type::Fighting, 90, 50)]);
    let switches = default_scenarios()
        .into_iter()
        .find(|s| s.name == "switches")
        .unwrap();
    let ctx = BattleContext::for_scenario(&a, &a, &table, &switches);
    let state = ctx.initial_state(&switches);
    assert_eq!(state.energy, [48, 0]);
    assert!(simulate(&a, &a.clone(), &switches, &table).rating > 500);
}
