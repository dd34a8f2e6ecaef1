//! pvp_engine - Trainer-battle ranking engine
//!
//! This library expands the type chart, allocates league-optimal stats,
//! simulates deterministic one-on-one battles and ranks every eligible
//! creature of a league across a set of battle scenarios.

/// Type definitions and type chart
pub mod types {
    include!(concat!(env!("OUT_DIR"), "/types.rs"));
}

/// Error types
pub mod error;

/// Input records and game-master loading
pub mod data;

/// Dual-type effectiveness and type strength
pub mod effectiveness;

/// IV and level allocation under CP caps
pub mod allocation;

/// Battle state (SoA memory layout)
pub mod state;

/// Combatant blueprints and spawning
pub mod entities;

/// Damage calculation
pub mod damage;

/// Turn resolution and scenarios
pub mod battle;

/// League ranking pipeline
pub mod pipeline;

// Re-export commonly used types
pub use allocation::{allocate, AllocationResult, BaseStats, Ivs, Level, LevelRange, StatAllocation};
pub use battle::{simulate, BattleOutcome, Scenario};
pub use data::{BaseCreature, GameMaster, LeagueRule, Move};
pub use effectiveness::{EffectivenessTable, TypePair, TypeStrengthReport};
pub use entities::{ChargedMove, Combatant, CombatantConfig, FastMove};
pub use error::{DataError, PipelineError};
pub use pipeline::{CancellationToken, LeagueRanking, Progress, Ranker, RankingEntry, RunOptions};
pub use state::BattleState;
pub use types::Type;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup() {
        assert_eq!(Type::from_str("Fire"), Some(Type::Fire));
        assert_eq!(Type::from_str(" water "), Some(Type::Water));
        assert_eq!(Type::from_str("plasma"), None);
        assert_eq!(Type::COUNT, 18);
        assert_eq!(Type::Steel.name(), "steel");
    }

    #[test]
    fn test_state_size() {
        // Small enough to copy freely every turn
        assert!(std::mem::size_of::<BattleState>() <= 48);
    }
}
