//! League ranking pipeline.
//!
//! For each league: filter the roster, allocate stats, expand every eligible
//! variant into loadouts, simulate every pairing under every scenario on a
//! rayon pool, then reduce the ratings into a sorted ranking.
//!
//! # Usage
//!
//! ```ignore
//! use pvp_engine::pipeline::{Ranker, RunOptions};
//!
//! let ranker = Ranker::new(&game_master, &table).options(RunOptions::default());
//! let ranking = ranker.rank_league(&league, &mut |p| println!("{}/{}", p.completed, p.total))?;
//! ```

pub mod aggregate;
pub mod control;
pub mod eligibility;
pub mod loadouts;
pub mod matchups;

pub use aggregate::{RankingEntry, ScenarioScore, Tallies};
pub use control::{CancellationToken, Progress};
pub use eligibility::{eligible_variants, Variant};
pub use loadouts::{build_loadouts, Loadout, Moveset};
pub use matchups::{planned_total, Matchup};

use serde::Serialize;

use crate::battle::{default_scenarios, Scenario};
use crate::data::{GameMaster, LeagueRule};
use crate::effectiveness::EffectivenessTable;
use crate::error::PipelineError;

/// Default number of matchups per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Execution knobs for a ranking run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub batch_size: usize,
    /// Worker threads; `None` uses rayon's default
    pub threads: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    Completed,
    NoEligibleCreatures,
}

/// Ranked output for one league.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeagueRanking {
    pub league: String,
    pub status: LeagueStatus,
    pub total_matchups: u64,
    pub entries: Vec<RankingEntry>,
}

impl LeagueRanking {
    fn empty(league: &str) -> Self {
        Self {
            league: league.to_string(),
            status: LeagueStatus::NoEligibleCreatures,
            total_matchups: 0,
            entries: Vec::new(),
        }
    }
}

/// Runs leagues over one game master.
///
/// Use builder methods to customize, then call `rank_league()` or
/// `rank_all()`.
#[derive(Clone, Debug)]
pub struct Ranker<'a> {
    game_master: &'a GameMaster,
    table: &'a EffectivenessTable,
    scenarios: Vec<Scenario>,
    options: RunOptions,
    token: CancellationToken,
}

impl<'a> Ranker<'a> {
    pub fn new(game_master: &'a GameMaster, table: &'a EffectivenessTable) -> Self {
        Self {
            game_master,
            table,
            scenarios: default_scenarios(),
            options: RunOptions::default(),
            token: CancellationToken::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Token that cancels this ranker's runs.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    // ========================================================================
    // Running
    // ========================================================================

    /// Rank one league. `progress` is called after every batch.
    pub fn rank_league(
        &self,
        league: &LeagueRule,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<LeagueRanking, PipelineError> {
        log::info!("Ranking league {}", league.id);

        let variants = eligible_variants(&self.game_master.creatures, league);
        if variants.is_empty() {
            log::info!("League {}: no eligible creatures", league.id);
            return Ok(LeagueRanking::empty(&league.id));
        }

        let loadouts = build_loadouts(&variants, &self.game_master.moves);
        if loadouts.is_empty() {
            log::info!("League {}: no usable movesets", league.id);
            return Ok(LeagueRanking::empty(&league.id));
        }
        let total = planned_total(loadouts.len(), &self.scenarios);
        log::debug!(
            "League {}: {} variants, {} loadouts, {} scenarios, {} matchups",
            league.id,
            variants.len(),
            loadouts.len(),
            self.scenarios.len(),
            total
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads.unwrap_or(0))
            .build()?;

        let batch_size = self.options.batch_size.max(1);
        let mut tallies = Tallies::new(loadouts.len(), self.scenarios.len());
        let mut completed = 0u64;
        let mut plan = matchups::enumerate(loadouts.len(), &self.scenarios);

        loop {
            if self.token.is_cancelled() {
                log::info!("League {} cancelled at {}/{}", league.id, completed, total);
                return Err(PipelineError::Cancelled { completed, total });
            }

            let batch: Vec<Matchup> = plan.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }

            let batch_tallies = pool.install(|| {
                matchups::run_batch(&batch, &loadouts, &self.scenarios, self.table, &self.token)
            });
            if self.token.is_cancelled() {
                log::info!("League {} cancelled at {}/{}", league.id, completed, total);
                return Err(PipelineError::Cancelled { completed, total });
            }

            tallies = tallies.merge(batch_tallies);
            completed += batch.len() as u64;
            progress(Progress { completed, total });
        }

        let entries = aggregate::rank_entries(&variants, &loadouts, &self.scenarios, &tallies);
        log::info!(
            "League {}: ranked {} variants over {} matchups",
            league.id,
            entries.len(),
            total
        );

        Ok(LeagueRanking {
            league: league.id.clone(),
            status: LeagueStatus::Completed,
            total_matchups: total,
            entries,
        })
    }

    /// Rank every league in the game master, one after another.
    pub fn rank_all(
        &self,
        progress: &mut dyn FnMut(&str, Progress),
    ) -> Result<Vec<LeagueRanking>, PipelineError> {
        self.game_master
            .leagues
            .iter()
            .map(|league| self.rank_league(league, &mut |p| progress(&league.id, p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_league() {
        let gm = GameMaster::default();
        let table = EffectivenessTable::new();
        let ranker = Ranker::new(&gm, &table);
        let mut calls = 0;
        let ranking = ranker
            .rank_league(&LeagueRule::capped("great", Some(1500)), &mut |_| calls += 1)
            .unwrap();
        assert_eq!(ranking.status, LeagueStatus::NoEligibleCreatures);
        assert!(ranking.entries.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_options_default() {
        let options = RunOptions::default();
        assert_eq!(options.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(options.threads, None);
    }
}
