use anyhow::Result;
use clap::Args;
use pvp_engine::effectiveness::TypeScore;
use pvp_engine::{EffectivenessTable, TypeStrengthReport};

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Typings printed per ranking
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

pub fn execute(args: TypesArgs) -> Result<()> {
    let table = EffectivenessTable::new();
    let report = TypeStrengthReport::compute(&table);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_scores("Offensive", &report.offensive, args.top);
    print_scores("Defensive", &report.defensive, args.top);
    Ok(())
}

fn print_scores(title: &str, scores: &[TypeScore], top: usize) {
    println!("\n=== {} ===", title);
    for (rank, s) in scores.iter().take(top).enumerate() {
        println!("{:>3}. {:<20} {:.5}", rank + 1, s.types.to_string(), s.score);
    }
}
