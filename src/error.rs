// src/error.rs
//! Error taxonomy.
//!
//! Per-player failures (`PlayerError`) are caught where a single player is
//! fetched and become skips. Roster and empty-result failures (`SyncError`)
//! end the cycle.

use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to the upstream statistics API.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("API base is not a usable URL: {0}")]
    BadBase(String),
}

/// Roster payload did not match any known shape.
#[derive(Debug, Error)]
#[error("unrecognized roster payload: {0}")]
pub struct RosterFormatError(pub String);

/// One player could not be synced. Never fatal to the cycle.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no player found for name `{name}`")]
    Resolution { name: String },

    #[error("fetch failed for `{name}`: {source}")]
    Fetch {
        name: String,
        #[source]
        source: SourceError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("growth multiplier must be finite and >= 1.0 (got {0})")]
    Growth(f64),

    #[error("base cost must be positive")]
    BaseCost,

    #[error("max level must be at least 1")]
    MaxLevel,

    #[error("cumulative XP overflows at level {0}")]
    Overflow(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cycle-level failure; no snapshot is produced and prior output is kept.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to fetch roster for claim {claim_id}: {source}")]
    RosterFetch {
        claim_id: String,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    RosterFormat(#[from] RosterFormatError),

    #[error("no players synced ({skipped} skipped)")]
    EmptyResult { skipped: usize },

    #[error(transparent)]
    Report(#[from] ReportError),
}
