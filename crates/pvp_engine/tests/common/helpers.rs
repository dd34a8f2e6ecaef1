//! Builders for combatants, rosters and move tables.

#![allow(dead_code)]

use std::collections::HashMap;

use pvp_engine::allocation::BaseStats;
use pvp_engine::data::{BaseCreature, GameMaster, LeagueRule, Move, MoveKind};
use pvp_engine::effectiveness::TypePair;
use pvp_engine::entities::{ChargedMove, Combatant, FastMove};
use pvp_engine::types::Type;

/// A plain Normal-type combatant with 100/100 stats.
pub fn combatant(hp: u16, fast: FastMove, charged: Vec<ChargedMove>) -> Combatant {
    Combatant {
        types: TypePair::single(Type::Normal),
        attack: 100.0,
        defense: 100.0,
        hp,
        fast,
        charged,
    }
}

/// Typical fast move: 2 turns, 8 energy.
pub fn counter() -> FastMove {
    FastMove::new(Type::Fighting, 8, 2, 8)
}

pub fn fast_record(id: &str, move_type: Type, power: u16, turns: u8, energy_gain: u8) -> Move {
    Move {
        id: id.to_string(),
        move_type,
        power,
        kind: MoveKind::Fast { turns, energy_gain },
        buffs: None,
    }
}

pub fn charged_record(id: &str, move_type: Type, power: u16, energy_cost: u8) -> Move {
    Move {
        id: id.to_string(),
        move_type,
        power,
        kind: MoveKind::Charged { energy_cost },
        buffs: None,
    }
}

pub fn move_table(moves: Vec<Move>) -> HashMap<String, Move> {
    moves.into_iter().map(|m| (m.id.clone(), m)).collect()
}

pub fn creature(id: &str, types: TypePair, stats: BaseStats, fast: &[&str], charged: &[&str]) -> BaseCreature {
    BaseCreature {
        id: id.to_string(),
        species: id.to_string(),
        form: None,
        dex: 1,
        types,
        base_stats: stats,
        fast_moves: fast.iter().map(|s| s.to_string()).collect(),
        charged_moves: charged.iter().map(|s| s.to_string()).collect(),
        evolutions: Vec::new(),
        shadow_available: false,
    }
}

/// Three creatures with one moveset each and a single great league.
pub fn small_game_master() -> GameMaster {
    let moves = move_table(vec![
        fast_record("counter", Type::Fighting, 8, 2, 8),
        fast_record("bubble", Type::Water, 7, 3, 11),
        fast_record("vine_whip", Type::Grass, 5, 2, 8),
        charged_record("dynamic_punch", Type::Fighting, 90, 50),
        charged_record("ice_beam", Type::Ice, 90, 55),
        charged_record("frenzy_plant", Type::Grass, 100, 45),
    ]);
    let creatures = vec![
        creature(
            "medicham",
            TypePair::new(Type::Fighting, Some(Type::Psychic)),
            BaseStats::new(121, 152, 155),
            &["counter"],
            &["dynamic_punch"],
        ),
        creature(
            "azumarill",
            TypePair::new(Type::Water, Some(Type::Fairy)),
            BaseStats::new(112, 152, 225),
            &["bubble"],
            &["ice_beam"],
        ),
        creature(
            "venusaur",
            TypePair::new(Type::Grass, Some(Type::Poison)),
            BaseStats::new(198, 189, 190),
            &["vine_whip"],
            &["frenzy_plant"],
        ),
    ];
    GameMaster {
        creatures,
        moves,
        leagues: vec![LeagueRule::capped("great", Some(1500))],
        skipped: 0,
    }
}
