//! Movesets for each variant, with prebuilt combatants.

use std::collections::HashMap;

use serde::Serialize;

use crate::data::Move;
use crate::entities::{ChargedMove, Combatant, CombatantConfig, FastMove};

use super::eligibility::Variant;

/// Move ids of a loadout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Moveset {
    pub fast: String,
    pub charged: Vec<String>,
}

impl Moveset {
    pub fn contains(&self, id: &str) -> bool {
        self.fast == id || self.charged.iter().any(|c| c == id)
    }

    /// Every move id, fast first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.fast.as_str()).chain(self.charged.iter().map(String::as_str))
    }
}

/// One variant with one moveset, ready to battle.
#[derive(Clone, Debug)]
pub struct Loadout {
    /// Index into the league's variant list
    pub variant: usize,
    pub moveset: Moveset,
    pub combatant: Combatant,
}

/// Unordered pairs of indices, or the single index when only one exists.
fn charged_combinations(count: usize) -> Vec<Vec<usize>> {
    match count {
        0 => Vec::new(),
        1 => vec![vec![0]],
        _ => (0..count)
            .flat_map(|i| (i + 1..count).map(move |j| vec![i, j]))
            .collect(),
    }
}

/// Known moves from a pool, first occurrence wins.
fn known<'m, T>(
    pool: &[String],
    moves: &'m HashMap<String, Move>,
    convert: impl Fn(&Move) -> Option<T>,
) -> Vec<(&'m str, T)> {
    let mut out: Vec<(&str, T)> = Vec::with_capacity(pool.len());
    for id in pool {
        if out.iter().any(|(seen, _)| *seen == id.as_str()) {
            continue;
        }
        match moves.get_key_value(id).and_then(|(key, m)| convert(m).map(|c| (key.as_str(), c))) {
            Some(entry) => out.push(entry),
            None => log::debug!("Ignoring unknown or mismatched move '{}'", id),
        }
    }
    out
}

/// Every fast move times every charged pair for every variant.
pub fn build_loadouts(variants: &[Variant], moves: &HashMap<String, Move>) -> Vec<Loadout> {
    let mut loadouts = Vec::new();

    for (index, variant) in variants.iter().enumerate() {
        let creature = variant.creature;
        let fast = known(&creature.fast_moves, moves, FastMove::from_move);
        let charged = known(&creature.charged_moves, moves, ChargedMove::from_move);
        let combos = charged_combinations(charged.len());

        if fast.is_empty() || combos.is_empty() {
            log::warn!("{}: no usable moveset, skipping", variant.id);
            continue;
        }

        for (fast_id, fast_move) in &fast {
            for combo in &combos {
                let mut config = CombatantConfig::new(creature.types, *variant.stats(), *fast_move)
                    .shadow(variant.shadow);
                for &slot in combo {
                    config = config.charged_move(charged[slot].1);
                }

                loadouts.push(Loadout {
                    variant: index,
                    moveset: Moveset {
                        fast: fast_id.to_string(),
                        charged: combo.iter().map(|&slot| charged[slot].0.to_string()).collect(),
                    },
                    combatant: config.build(),
                });
            }
        }
    }

    loadouts
}
