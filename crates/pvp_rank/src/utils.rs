use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Directory under the project root holding saved runs
pub const RUNS_DIR: &str = ".rank_runs";

/// Saved runs kept besides `latest.json`
pub const KEEP_RUNS: usize = 50;

/// Nearest ancestor of the working directory with a `Cargo.toml`.
pub fn find_project_root() -> Result<PathBuf> {
    let start = std::env::current_dir().context("Failed to read working directory")?;
    let mut dir = start.clone();
    loop {
        if dir.join("Cargo.toml").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Ok(start);
        }
    }
}

/// Write `<timestamp>.json` and `latest.json`, then prune old runs.
pub fn save_rank_run(timestamp: &str, json: &str) -> Result<PathBuf> {
    let runs_dir = find_project_root()?.join(RUNS_DIR);
    fs::create_dir_all(&runs_dir)
        .with_context(|| format!("Failed to create {}", runs_dir.display()))?;

    let timestamped_path = runs_dir.join(format!("{}.json", timestamp));
    fs::write(&timestamped_path, json)
        .with_context(|| format!("Failed to write {}", timestamped_path.display()))?;

    let latest_path = runs_dir.join("latest.json");
    fs::write(&latest_path, json)
        .with_context(|| format!("Failed to write {}", latest_path.display()))?;

    cleanup_old_runs(&runs_dir, KEEP_RUNS)?;
    Ok(timestamped_path)
}

fn cleanup_old_runs(dir: &Path, keep: usize) -> Result<()> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name().to_string_lossy() != "latest.json"
                && e.path().extension().map(|x| x == "json").unwrap_or(false)
        })
        .collect();

    if files.len() <= keep {
        return Ok(());
    }

    // Timestamps sort chronologically
    files.sort_by_key(|e| e.file_name());

    let to_remove = files.len() - keep;
    for entry in files.into_iter().take(to_remove) {
        if let Err(e) = fs::remove_file(entry.path()) {
            log::warn!("Could not remove old run {}: {}", entry.path().display(), e);
        }
    }
    Ok(())
}

/// Unix seconds for file names plus an ISO-8601 UTC rendering.
pub fn get_timestamps() -> (String, String) {
    let now = Utc::now();
    (now.timestamp().to_string(), iso_utc(&now))
}

fn iso_utc(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
