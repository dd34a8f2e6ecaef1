use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use pvp_engine::battle::{default_scenarios, load_scenarios};
use pvp_engine::pipeline::{LeagueRanking, LeagueStatus, Progress, Ranker, RunOptions, DEFAULT_BATCH_SIZE};
use pvp_engine::{EffectivenessTable, GameMaster};

use crate::models::RunSummary;
use crate::utils::{find_project_root, get_timestamps, save_rank_run};

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Game master JSON (defaults to data/gamemaster.json under the project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Rank only this league
    #[arg(short, long)]
    pub league: Option<String>,

    /// Scenario set JSON replacing the default scenarios
    #[arg(short, long)]
    pub scenarios: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Matchups per parallel batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Entries printed per league
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Skip writing the run summary
    #[arg(long)]
    pub no_save: bool,
}

pub fn execute(args: RankArgs) -> Result<()> {
    let data_path = match args.data {
        Some(path) => path,
        None => find_project_root()?.join("data").join("gamemaster.json"),
    };
    log::info!("Loading game master: {}", data_path.display());
    let game_master = GameMaster::load(&data_path)
        .with_context(|| format!("Failed to load {}", data_path.display()))?;

    let scenarios = match &args.scenarios {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("Failed to load scenarios from {}", path.display()))?,
        None => default_scenarios(),
    };
    if scenarios.is_empty() {
        bail!("No scenarios to run");
    }

    let leagues: Vec<_> = match &args.league {
        Some(id) => match game_master.league(id) {
            Some(league) => vec![league.clone()],
            None => bail!("Unknown league '{}'", id),
        },
        None => game_master.leagues.clone(),
    };

    let table = EffectivenessTable::new();
    let ranker = Ranker::new(&game_master, &table)
        .scenarios(scenarios.clone())
        .options(RunOptions {
            batch_size: args.batch_size,
            threads: args.threads,
        });

    let start = Instant::now();
    let mut rankings: Vec<LeagueRanking> = Vec::with_capacity(leagues.len());
    let mut warnings = Vec::new();

    for league in &leagues {
        let ranking = ranker.rank_league(league, &mut |p: Progress| {
            log::debug!("{}: {}/{} ({:.0}%)", league.id, p.completed, p.total, p.fraction() * 100.0);
        })?;
        if ranking.status == LeagueStatus::NoEligibleCreatures {
            warnings.push(format!("League {} has no eligible creatures", league.id));
        }
        print_ranking(&ranking, args.top);
        rankings.push(ranking);
    }

    let duration = start.elapsed();
    println!("\nRanked {} leagues in {:.2}s", rankings.len(), duration.as_secs_f64());

    if args.no_save {
        return Ok(());
    }

    let (timestamp, timestamp_human) = get_timestamps();
    let summary = RunSummary {
        timestamp: timestamp.clone(),
        timestamp_human,
        duration_seconds: duration.as_secs_f64(),
        data_file: data_path.display().to_string(),
        skipped_records: game_master.skipped,
        scenarios: scenarios.iter().map(|s| s.name.clone()).collect(),
        leagues: rankings,
        warnings,
    };
    let json = serde_json::to_string_pretty(&summary)?;
    let path = save_rank_run(&timestamp, &json)?;
    println!("Summary saved to {}", path.display());
    Ok(())
}

fn print_ranking(ranking: &LeagueRanking, top: usize) {
    println!("\n=== {} ({} matchups) ===", ranking.league, ranking.total_matchups);
    if ranking.entries.is_empty() {
        println!("  (no entries)");
        return;
    }
    for (rank, entry) in ranking.entries.iter().take(top).enumerate() {
        println!(
            "{:>3}. {:<28} {:>5.1}  {:<12} {} / {}",
            rank + 1,
            entry.variant,
            entry.score,
            entry.role,
            entry.moveset.fast,
            entry.moveset.charged.join(", ")
        );
    }
}
