//! Error types for data loading and the ranking pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with input records or files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown type '{0}'")]
    UnknownType(String),
    #[error("{0}: missing or zero base stats")]
    MissingStats(String),
    #[error("{0}: expected one or two types, found {1}")]
    TypeCount(String, usize),
    #[error("{0}: empty {1} move pool")]
    EmptyMovePool(String, &'static str),
    #[error("Invalid move '{0}': {1}")]
    InvalidMove(String, &'static str),
}

/// Reasons a league run did not produce a ranking.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Ranking run cancelled after {completed} of {total} matchups")]
    Cancelled { completed: u64, total: u64 },
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
