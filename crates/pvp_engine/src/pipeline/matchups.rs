//! Matchup enumeration and parallel batch execution.

use rayon::prelude::*;

use crate::battle::{simulate, Scenario, MAX_RATING};
use crate::effectiveness::EffectivenessTable;

use super::aggregate::Tallies;
use super::control::CancellationToken;
use super::loadouts::Loadout;

/// One simulation: `first` battles `second` under a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Matchup {
    pub first: u32,
    pub second: u32,
    pub scenario: u16,
}

/// Number of simulations for `n` loadouts.
///
/// Symmetric scenarios run once per unordered pair, the rest once per
/// ordered pair.
pub fn planned_total(loadouts: usize, scenarios: &[Scenario]) -> u64 {
    let n = loadouts as u64;
    let unordered = n * n.saturating_sub(1) / 2;
    scenarios
        .iter()
        .map(|s| if s.is_symmetric() { unordered } else { unordered * 2 })
        .sum()
}

/// Lazily enumerate every matchup, scenario-major.
pub fn enumerate(loadouts: usize, scenarios: &[Scenario]) -> impl Iterator<Item = Matchup> + '_ {
    let n = loadouts as u32;
    scenarios.iter().enumerate().flat_map(move |(s, scenario)| {
        let symmetric = scenario.is_symmetric();
        (0..n).flat_map(move |i| {
            let start = if symmetric { i + 1 } else { 0 };
            (start..n).filter(move |&j| j != i).map(move |j| Matchup {
                first: i,
                second: j,
                scenario: s as u16,
            })
        })
    })
}

/// Run one batch in parallel and fold the ratings into fresh tallies.
///
/// Matchups picked up after cancellation are skipped; the caller discards
/// the whole league in that case.
pub fn run_batch(
    batch: &[Matchup],
    loadouts: &[Loadout],
    scenarios: &[Scenario],
    table: &EffectivenessTable,
    token: &CancellationToken,
) -> Tallies {
    let empty = || Tallies::new(loadouts.len(), scenarios.len());

    batch
        .par_iter()
        .fold(empty, |mut tallies, m| {
            if token.is_cancelled() {
                return tallies;
            }
            let scenario = &scenarios[m.scenario as usize];
            let first = m.first as usize;
            let second = m.second as usize;
            let outcome = simulate(
                &loadouts[first].combatant,
                &loadouts[second].combatant,
                scenario,
                table,
            );

            tallies.record(first, m.scenario as usize, outcome.rating);
            if scenario.is_symmetric() {
                tallies.record(second, m.scenario as usize, MAX_RATING - outcome.rating);
            }
            tallies
        })
        .reduce(empty, Tallies::merge)
}
