//! League eligibility and stat allocation per creature variant.

use std::collections::HashSet;

use crate::allocation::{allocate, AllocationResult, Ivs, StatAllocation};
use crate::data::{BaseCreature, LeagueRule};

/// Uncapped leagues drop creatures below this share of the roster's best
/// max-IV stat product.
pub const UNCAPPED_PRUNE_RATIO: f64 = 0.35;

/// Suffix appended to shadow variant ids.
pub const SHADOW_SUFFIX: &str = "_shadow";

/// A creature as it enters one league: normal or shadow, with its allocation.
#[derive(Clone, Debug)]
pub struct Variant<'a> {
    pub id: String,
    pub creature: &'a BaseCreature,
    pub shadow: bool,
    pub allocation: AllocationResult,
}

impl Variant<'_> {
    #[inline]
    pub fn stats(&self) -> &StatAllocation {
        &self.allocation.best
    }
}

/// Whether the creature passes the league's ban, type and allow-list rules.
pub fn passes_filters(creature: &BaseCreature, league: &LeagueRule) -> bool {
    if league.is_banned(creature) {
        return false;
    }
    if let Some(types) = &league.allowed_types {
        if !types.iter().any(|t| creature.types.contains(*t)) {
            return false;
        }
    }
    if let Some(allowed) = &league.allowed_species {
        if !allowed.iter().any(|a| a.matches(creature)) {
            return false;
        }
    }
    true
}

/// Drop every creature another candidate evolves into.
fn first_stages<'a>(candidates: Vec<&'a BaseCreature>) -> Vec<&'a BaseCreature> {
    let targets: HashSet<&str> = candidates
        .iter()
        .flat_map(|c| c.evolutions.iter().map(String::as_str))
        .collect();
    candidates
        .into_iter()
        .filter(|c| !targets.contains(c.id.as_str()))
        .collect()
}

/// Drop creatures far below the roster's best max-IV stat product.
fn prune_weak<'a>(candidates: Vec<&'a BaseCreature>, league: &LeagueRule) -> Vec<&'a BaseCreature> {
    let level = league.level_range().max;
    let product = |c: &BaseCreature| StatAllocation::compute(c.base_stats, Ivs::PERFECT, level).stat_product();

    let best = candidates.iter().map(|c| product(c)).fold(0.0, f64::max);
    let threshold = best * UNCAPPED_PRUNE_RATIO;
    candidates
        .into_iter()
        .filter(|c| {
            let keep = product(c) >= threshold;
            if !keep {
                log::debug!("{}: pruned from uncapped league {}", c.id, league.id);
            }
            keep
        })
        .collect()
}

/// Every variant that may enter `league`, with allocations computed once.
pub fn eligible_variants<'a>(roster: &'a [BaseCreature], league: &LeagueRule) -> Vec<Variant<'a>> {
    let mut candidates: Vec<&BaseCreature> = roster.iter().filter(|c| passes_filters(c, league)).collect();

    if league.first_stage_only {
        candidates = first_stages(candidates);
    }
    if !league.is_capped() {
        candidates = prune_weak(candidates, league);
    }

    let levels = league.level_range();
    let mut variants = Vec::with_capacity(candidates.len() * 2);
    for creature in candidates {
        let allocation = allocate(creature.base_stats, league.cp_cap, league.iv_floor, levels);
        if !allocation.is_eligible() {
            log::debug!("{}: no allocation fits league {}", creature.id, league.id);
            continue;
        }

        variants.push(Variant {
            id: creature.id.clone(),
            creature,
            shadow: false,
            allocation,
        });
        if creature.shadow_available && league.allow_shadows {
            variants.push(Variant {
                id: format!("{}{}", creature.id, SHADOW_SUFFIX),
                creature,
                shadow: true,
                allocation,
            });
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::BaseStats;
    use crate::data::AllowedSpecies;
    use crate::effectiveness::TypePair;
    use crate::types::Type;

    fn creature(id: &str, types: TypePair, stats: BaseStats) -> BaseCreature {
        BaseCreature {
            id: id.to_string(),
            species: id.to_string(),
            form: None,
            dex: 1,
            types,
            base_stats: stats,
            fast_moves: vec!["tackle".into()],
            charged_moves: vec!["body_slam".into()],
            evolutions: Vec::new(),
            shadow_available: false,
        }
    }

    fn roster() -> Vec<BaseCreature> {
        let mut marill = creature(
            "marill",
            TypePair::new(Type::Water, Some(Type::Fairy)),
            BaseStats::new(37, 93, 172),
        );
        marill.evolutions = vec!["azumarill".into()];
        let mut azumarill = creature(
            "azumarill",
            TypePair::new(Type::Water, Some(Type::Fairy)),
            BaseStats::new(112, 152, 225),
        );
        azumarill.shadow_available = true;
        let medicham = creature(
            "medicham",
            TypePair::new(Type::Fighting, Some(Type::Psychic)),
            BaseStats::new(121, 152, 155),
        );
        vec![marill, azumarill, medicham]
    }

    fn ids(variants: &[Variant]) -> Vec<String> {
        variants.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_open_league_with_shadows() {
        let roster = roster();
        let league = LeagueRule::capped("great", Some(1500));
        let variants = eligible_variants(&roster, &league);
        assert_eq!(
            ids(&variants),
            vec!["marill", "azumarill", "azumarill_shadow", "medicham"]
        );
        assert!(variants.iter().all(|v| v.stats().cp <= 1500));

        let mut no_shadows = league.clone();
        no_shadows.allow_shadows = false;
        assert_eq!(eligible_variants(&roster, &no_shadows).len(), 3);
    }

    #[test]
    fn test_bans_and_type_filter() {
        let roster = roster();
        let mut league = LeagueRule::capped("cup", Some(1500));
        league.banned_species = vec!["medicham".into()];
        league.allowed_types = Some(vec![Type::Fairy]);
        league.allow_shadows = false;
        assert_eq!(ids(&eligible_variants(&roster, &league)), vec!["marill", "azumarill"]);

        league.allowed_types = Some(vec![Type::Psychic]);
        assert!(eligible_variants(&roster, &league).is_empty());
    }

    #[test]
    fn test_allow_list() {
        let roster = roster();
        let mut league = LeagueRule::capped("cup", Some(1500));
        league.allowed_species = Some(vec![AllowedSpecies {
            species: "medicham".into(),
            form: None,
        }]);
        assert_eq!(ids(&eligible_variants(&roster, &league)), vec!["medicham"]);
    }

    #[test]
    fn test_first_stage_only() {
        let roster = roster();
        let mut league = LeagueRule::capped("little", Some(500));
        league.first_stage_only = true;
        assert_eq!(ids(&eligible_variants(&roster, &league)), vec!["marill", "medicham"]);
    }

    #[test]
    fn test_uncapped_prunes_weak() {
        let mut roster = roster();
        roster.push(creature(
            "sunkern",
            TypePair::single(Type::Grass),
            BaseStats::new(55, 55, 102),
        ));
        let league = LeagueRule::capped("master", None);
        let variants = eligible_variants(&roster, &league);
        assert!(!ids(&variants).contains(&"sunkern".to_string()));
        assert!(ids(&variants).contains(&"medicham".to_string()));
    }

    #[test]
    fn test_ineligible_allocation_excluded() {
        let roster = vec![creature(
            "giant",
            TypePair::single(Type::Steel),
            BaseStats::new(300, 300, 300),
        )];
        let league = LeagueRule::capped("tiny", Some(50));
        // Level 1 already exceeds 50 CP
        assert!(eligible_variants(&roster, &league).is_empty());
    }
}
