// src/store.rs
//! Snapshot data model and the flat CSV backup.
//!
//! A `GuildSnapshot` is built fresh each cycle by `sync::aggregate` and
//! replaces the previous one wholesale. `DataSet` is the tabular form shared
//! by the CSV backup and the HTML report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::consts::{AVERAGE_ROW_NAME, TIMESTAMP_FORMAT};
use crate::csv::rows_to_string;
use crate::error::ReportError;
use crate::file::write_replacing;

/// Levels for one player, keyed by skill display name.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillLevels {
    pub name: String,
    pub captured_at: DateTime<Local>,
    pub levels: BTreeMap<String, u32>,
}

impl SkillLevels {
    pub fn new(name: impl Into<String>, captured_at: DateTime<Local>) -> Self {
        Self { name: name.into(), captured_at, levels: BTreeMap::new() }
    }

    pub fn get(&self, skill: &str) -> Option<u32> {
        self.levels.get(skill).copied()
    }

    pub fn with_level(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.levels.insert(skill.into(), level);
        self
    }
}

/// Per-skill mean across all player rows, rounded to one decimal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AverageRow {
    pub values: BTreeMap<String, f64>,
}

impl AverageRow {
    pub fn get(&self, skill: &str) -> Option<f64> {
        self.values.get(skill).copied()
    }
}

/// Sorted players plus the trailing average row.
#[derive(Clone, Debug, PartialEq)]
pub struct GuildSnapshot {
    /// Skill columns in display order.
    pub columns: Vec<String>,
    pub primary_skill: Option<String>,
    pub players: Vec<SkillLevels>,
    pub average: AverageRow,
}

impl GuildSnapshot {
    /// Rows including the average row.
    pub fn row_count(&self) -> usize { self.players.len() + 1 }

    pub fn headers(&self) -> Vec<String> {
        let mut h = Vec::with_capacity(2 + self.columns.len());
        h.push(s!("Name"));
        h.push(s!("Timestamp"));
        h.extend(self.columns.iter().cloned());
        h
    }

    /// Flatten into string rows; the average row is always last.
    pub fn to_dataset(&self) -> DataSet {
        let mut rows = Vec::with_capacity(self.row_count());

        for p in &self.players {
            let mut row = Vec::with_capacity(2 + self.columns.len());
            row.push(p.name.clone());
            row.push(p.captured_at.format(TIMESTAMP_FORMAT).to_string());
            for col in &self.columns {
                row.push(p.get(col).map(|v| v.to_string()).unwrap_or_default());
            }
            rows.push(row);
        }

        let mut avg = Vec::with_capacity(2 + self.columns.len());
        avg.push(s!(AVERAGE_ROW_NAME));
        avg.push(s!("-"));
        for col in &self.columns {
            avg.push(self.average.get(col).map(|v| format!("{v:.1}")).unwrap_or_default());
        }
        rows.push(avg);

        DataSet { headers: Some(self.headers()), rows }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Write the flat CSV backup, replacing any previous file.
pub fn save_snapshot(snapshot: &GuildSnapshot, path: &Path) -> Result<PathBuf, ReportError> {
    let ds = snapshot.to_dataset();
    let contents = rows_to_string(&ds.rows, &ds.headers, ',');
    write_replacing(path, contents.as_bytes())?;
    Ok(path.to_path_buf())
}
