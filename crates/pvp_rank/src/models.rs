use pvp_engine::LeagueRanking;
use serde::Serialize;

/// Saved record of one `rank` invocation.
#[derive(Serialize, Clone)]
pub struct RunSummary {
    pub timestamp: String,
    pub timestamp_human: String,
    pub duration_seconds: f64,
    pub data_file: String,
    pub skipped_records: usize,
    pub scenarios: Vec<String>,
    pub leagues: Vec<LeagueRanking>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
