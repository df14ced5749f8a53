// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::{ConfigError, CurveError};
use crate::levels::LevelCurve;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub roster: RosterOptions,
    pub curve: CurveOptions,
    pub fetch: FetchOptions,
    pub aggregate: AggregateOptions,
    pub export: ExportOptions,
    pub schedule: ScheduleOptions,
}

impl AppOptions {
    /// Load options from TOML. With `None`, the default config file is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let text = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.source().is_none() {
            return Err(ConfigError::Invalid(s!("no claim id and no player names configured")));
        }
        self.curve.build().map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.fetch.workers == 0 {
            return Err(ConfigError::Invalid(s!("workers must be at least 1")));
        }
        if self.schedule.interval_secs == 0 {
            return Err(ConfigError::Invalid(s!("sync interval must be positive")));
        }
        Ok(())
    }
}

/* ---------------- Roster ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterSource {
    /// Members of an upstream claim.
    Claim(String),
    /// Fixed list of player names, resolved by search.
    Names(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterOptions {
    pub claim_id: Option<String>,
    pub players: Vec<String>,
    /// Names that are metadata leaking into member lists, compared case-insensitively.
    pub sentinels: Vec<String>,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            claim_id: None,
            players: Vec::new(),
            sentinels: SENTINEL_NAMES.iter().map(|s| s!(*s)).collect(),
        }
    }
}

impl RosterOptions {
    /// A claim wins over a static list.
    pub fn source(&self) -> Option<RosterSource> {
        match &self.claim_id {
            Some(id) if !id.trim().is_empty() => Some(RosterSource::Claim(s!(id.trim()))),
            _ if !self.players.is_empty() => Some(RosterSource::Names(self.players.clone())),
            _ => None,
        }
    }
}

/* ---------------- Curve ---------------- */

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    pub growth: f64,
    pub base_cost: u64,
    pub max_level: usize,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self { growth: XP_GROWTH, base_cost: XP_BASE_COST, max_level: MAX_LEVEL }
    }
}

impl CurveOptions {
    pub fn build(&self) -> Result<LevelCurve, CurveError> {
        LevelCurve::new(self.growth, self.base_cost, self.max_level)
    }
}

/* ---------------- Fetch ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub api_base: String,
    pub workers: usize,
    pub request_pause_ms: u64,
    pub roster_timeout_secs: u64,
    pub player_timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_base: s!(API_BASE),
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
            roster_timeout_secs: ROSTER_TIMEOUT_SECS,
            player_timeout_secs: PLAYER_TIMEOUT_SECS,
        }
    }
}

impl FetchOptions {
    pub fn request_pause(&self) -> Duration { Duration::from_millis(self.request_pause_ms) }
}

/* ---------------- Aggregate ---------------- */

/// What a player without any XP in a skill counts as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackfillMode {
    /// Missing skills become level 1 before averaging.
    #[default]
    Floor,
    /// Missing skills stay empty and are left out of the mean.
    Exclude,
}

impl FromStr for BackfillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "floor" => Ok(BackfillMode::Floor),
            "exclude" => Ok(BackfillMode::Exclude),
            other => Err(format!("unknown backfill mode: {other} (expected floor|exclude)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregateOptions {
    /// Canonical column order. Empty means "every skill seen, alphabetical".
    pub skills: Vec<String>,
    /// Sort column; defaults to the first column.
    pub primary_skill: Option<String>,
    pub backfill: BackfillMode,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            skills: SKILLS.iter().map(|s| s!(*s)).collect(),
            primary_skill: None,
            backfill: BackfillMode::Floor,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub csv_file: String,
    pub html_file: String,
    pub title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            csv_file: s!(DEFAULT_CSV_FILE),
            html_file: s!(DEFAULT_HTML_FILE),
            title: s!("Guild Skill Levels"),
        }
    }
}

impl ExportOptions {
    pub fn csv_path(&self) -> PathBuf { self.out_dir.join(&self.csv_file) }
    pub fn html_path(&self) -> PathBuf { self.out_dir.join(&self.html_file) }
}

/* ---------------- Schedule ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    pub interval_secs: u64,
    pub once: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self { interval_secs: SYNC_INTERVAL_SECS, once: false }
    }
}

impl ScheduleOptions {
    pub fn interval(&self) -> Duration { Duration::from_secs(self.interval_secs) }
}
