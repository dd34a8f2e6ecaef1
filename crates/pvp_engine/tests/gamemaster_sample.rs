//! Loading the bundled sample game master.

use std::path::Path;

use pvp_engine::battle::load_scenarios;
use pvp_engine::data::MoveKind;
use pvp_engine::pipeline::eligible_variants;
use pvp_engine::GameMaster;

fn data_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data"))
}

#[test]
fn sample_loads_and_skips_malformed() {
    let gm = GameMaster::load(&data_dir().join("gamemaster.json")).unwrap();

    // missingno has an unknown type and zero defense, ditto has no fast moves
    assert_eq!(gm.skipped, 2);
    assert!(gm.creature("missingno").is_none());
    assert!(gm.creature("marowak_alolan").is_some());
    assert!(gm.creature("marowak").is_some());

    let brave_bird = gm.get_move("brave_bird").unwrap();
    assert_eq!(brave_bird.kind, MoveKind::Charged { energy_cost: 55 });
    assert!(brave_bird.buffs.is_some());
    // Chance-based effects are dropped
    assert!(gm.get_move("flash_cannon").unwrap().buffs.is_none());

    assert!(gm.league("master").unwrap().cp_cap.is_none());
}

#[test]
fn sample_little_league_is_first_stage() {
    let gm = GameMaster::load(&data_dir().join("gamemaster.json")).unwrap();
    let little = gm.league("little").unwrap();
    let variants = eligible_variants(&gm.creatures, little);
    let ids: Vec<&str> = variants.iter().map(|v| v.id.as_str()).collect();

    for evolved in ["ivysaur", "venusaur", "azumarill", "medicham"] {
        assert!(!ids.contains(&evolved), "{} should be excluded", evolved);
    }
    assert!(ids.contains(&"bulbasaur"));
    assert!(ids.iter().all(|id| !id.ends_with("_shadow")));
    assert!(variants.iter().all(|v| v.stats().cp <= 500));
}

#[test]
fn sample_scenarios_load() {
    let scenarios = load_scenarios(&data_dir().join("scenarios.json")).unwrap();
    assert_eq!(scenarios.len(), 6);
    assert!(scenarios.iter().find(|s| s.name == "farming").unwrap().is_symmetric());
    assert!(scenarios.iter().find(|s| s.name == "leads-baited").unwrap().baits(0));
}
