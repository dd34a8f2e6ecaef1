//! Rating tallies and their reduction into ranking entries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::allocation::StatAllocation;
use crate::battle::{Scenario, EVEN_RATING};
use crate::effectiveness::TypePair;

use super::eligibility::Variant;
use super::loadouts::{Loadout, Moveset};

/// Display score given to every entry when all raw scores are equal.
pub const FLAT_DISPLAY_SCORE: f64 = 50.0;

/// Highest display score.
pub const MAX_DISPLAY_SCORE: f64 = 100.0;

// ============================================================================
// Tallies
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    sum: u64,
    count: u32,
}

/// Rating sums per (loadout, scenario) plus wins per loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tallies {
    scenarios: usize,
    cells: Vec<Cell>,
    wins: Vec<u32>,
}

impl Tallies {
    pub fn new(loadouts: usize, scenarios: usize) -> Self {
        Self {
            scenarios,
            cells: vec![Cell::default(); loadouts * scenarios],
            wins: vec![0; loadouts],
        }
    }

    #[inline]
    pub fn record(&mut self, loadout: usize, scenario: usize, rating: u16) {
        let cell = &mut self.cells[loadout * self.scenarios + scenario];
        cell.sum += rating as u64;
        cell.count += 1;
        if rating > EVEN_RATING {
            self.wins[loadout] += 1;
        }
    }

    /// Element-wise sum.
    pub fn merge(mut self, other: Tallies) -> Tallies {
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            a.sum += b.sum;
            a.count += b.count;
        }
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        self
    }

    /// Mean rating of a loadout in a scenario, `None` without matchups.
    pub fn mean(&self, loadout: usize, scenario: usize) -> Option<f64> {
        let cell = self.cells.get(loadout * self.scenarios + scenario)?;
        (cell.count > 0).then(|| cell.sum as f64 / cell.count as f64)
    }

    #[inline]
    pub fn wins(&self, loadout: usize) -> u32 {
        self.wins.get(loadout).copied().unwrap_or(0)
    }

    pub fn matchups(&self) -> u64 {
        self.cells.iter().map(|c| c.count as u64).sum()
    }
}

// ============================================================================
// Entries
// ============================================================================

/// Best mean rating of a variant in one scenario.
///
/// `score` is the highest per-loadout *mean* over that loadout's matchups,
/// not the best single battle rating.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioScore {
    pub scenario: String,
    pub score: f64,
}

/// Ranked result for one creature variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingEntry {
    pub variant: String,
    pub species: String,
    pub shadow: bool,
    pub types: TypePair,
    pub allocation: StatAllocation,
    pub moveset: Moveset,
    /// Scenario the variant scores best in
    pub role: String,
    pub raw_score: f64,
    /// Raw score rescaled to [0, 100] within the league
    pub score: f64,
    pub scenario_scores: Vec<ScenarioScore>,
    /// Wins credited to each move of the variant
    pub move_usage: BTreeMap<String, u32>,
}

/// Geometric mean; any zero makes the result zero.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| *v <= 0.0) {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}

/// Item with the largest `key`, earliest on ties.
fn first_max_by<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
    items.fold(None, |best, item| match best {
        Some(b) if key(&b) >= key(&item) => Some(b),
        _ => Some(item),
    })
}

/// Reduce a league's tallies into unsorted, unnormalized entries.
fn score_variants(
    variants: &[Variant],
    loadouts: &[Loadout],
    scenarios: &[Scenario],
    tallies: &Tallies,
) -> Vec<RankingEntry> {
    let mut by_variant: Vec<Vec<usize>> = vec![Vec::new(); variants.len()];
    for (index, loadout) in loadouts.iter().enumerate() {
        by_variant[loadout.variant].push(index);
    }

    let mut entries = Vec::with_capacity(variants.len());
    for (variant, owned) in variants.iter().zip(&by_variant) {
        // (scenario, best mean, loadout behind it)
        let best: Vec<(usize, f64, usize)> = (0..scenarios.len())
            .filter_map(|s| {
                first_max_by(
                    owned.iter().filter_map(|&l| tallies.mean(l, s).map(|m| (l, m))),
                    |(_, m)| *m,
                )
                .map(|(l, m)| (s, m, l))
            })
            .collect();
        if best.is_empty() {
            continue;
        }

        let scores: Vec<f64> = best.iter().map(|(_, m, _)| *m).collect();
        let raw_score = geometric_mean(&scores);

        let Some(&(role, _, best_loadout)) = first_max_by(best.iter(), |(_, m, _)| *m) else {
            continue;
        };
        let recommended = match first_max_by(owned.iter().copied(), |&l| tallies.wins(l) as f64) {
            Some(l) if tallies.wins(l) > 0 => l,
            _ => best_loadout,
        };

        let mut move_usage = BTreeMap::new();
        for &l in owned {
            for id in loadouts[l].moveset.ids() {
                *move_usage.entry(id.to_string()).or_insert(0) += tallies.wins(l);
            }
        }

        entries.push(RankingEntry {
            variant: variant.id.clone(),
            species: variant.creature.species.clone(),
            shadow: variant.shadow,
            types: variant.creature.types,
            allocation: *variant.stats(),
            moveset: loadouts[recommended].moveset.clone(),
            role: scenarios[role].name.clone(),
            raw_score,
            score: 0.0,
            scenario_scores: best
                .iter()
                .map(|&(s, score, _)| ScenarioScore {
                    scenario: scenarios[s].name.clone(),
                    score,
                })
                .collect(),
            move_usage,
        });
    }
    entries
}

/// Rescale raw scores to [0, 100] over the league's range.
pub fn normalize(entries: &mut [RankingEntry]) {
    let min = entries.iter().map(|e| e.raw_score).fold(f64::INFINITY, f64::min);
    let max = entries.iter().map(|e| e.raw_score).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    for entry in entries.iter_mut() {
        entry.score = if span > 0.0 {
            (entry.raw_score - min) / span * MAX_DISPLAY_SCORE
        } else {
            FLAT_DISPLAY_SCORE
        };
    }
}

/// Build the final, sorted ranking for a league.
pub fn rank_entries(
    variants: &[Variant],
    loadouts: &[Loadout],
    scenarios: &[Scenario],
    tallies: &Tallies,
) -> Vec<RankingEntry> {
    let mut entries = score_variants(variants, loadouts, scenarios, tallies);
    normalize(&mut entries);
    entries.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.variant.cmp(&b.variant)));
    entries
}
