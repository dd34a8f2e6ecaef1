//! League ranking command line.
//!
//! Loads a game master, ranks its leagues and saves a JSON summary to
//! `.rank_runs/` with versioning.
//!
//! Usage:
//!   cargo run -p pvp_rank -- rank --data data/gamemaster.json
//!   cargo run -p pvp_rank -- rank --league great --top 20
//!   cargo run -p pvp_rank -- types --json

mod cmd;
mod models;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::{rank, types};

#[derive(Parser)]
#[command(name = "pvp_rank")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank leagues and save a summary
    Rank(rank::RankArgs),

    /// Print the type strength report
    Types(types::TypesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Some(Commands::Rank(args)) => rank::execute(args),
        Some(Commands::Types(args)) => types::execute(args),
        None => {
            // Require explicit subcommand to avoid flag ambiguity at the root.
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
