// src/report/mod.rs
//! Report emission: everything a finished snapshot is turned into.
//!
//! The sync cycle only knows `ReportSink`. `FileReport` writes the CSV backup
//! and the HTML page; both are replaced whole, so a reader never sees a
//! half-written report.

pub mod html;

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::options::ExportOptions;
use crate::error::ReportError;
use crate::file::write_replacing;
use crate::store::{save_snapshot, GuildSnapshot};

pub trait ReportSink {
    /// Publish a finished snapshot. Returns the paths written, if any.
    fn emit(
        &mut self,
        snapshot: &GuildSnapshot,
        countdown: &str,
        generated_at: DateTime<Local>,
    ) -> Result<Vec<PathBuf>, ReportError>;
}

/// CSV backup + HTML page on disk.
#[derive(Clone, Debug)]
pub struct FileReport {
    csv_path: PathBuf,
    html_path: PathBuf,
    title: String,
    refresh: Option<Duration>,
}

impl FileReport {
    /// `refresh` is the sync interval; the page reloads itself at that rate.
    pub fn new(opts: &ExportOptions, refresh: Option<Duration>) -> Self {
        Self {
            csv_path: opts.csv_path(),
            html_path: opts.html_path(),
            title: opts.title.clone(),
            refresh,
        }
    }
}

impl ReportSink for FileReport {
    fn emit(
        &mut self,
        snapshot: &GuildSnapshot,
        countdown: &str,
        generated_at: DateTime<Local>,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let csv = save_snapshot(snapshot, &self.csv_path)?;

        let page = html::render(snapshot, &html::PageMeta {
            title: &self.title,
            countdown,
            generated_at,
            refresh: self.refresh,
        });
        write_replacing(&self.html_path, page.as_bytes())?;

        info!(csv = %csv.display(), html = %self.html_path.display(), "report written");
        Ok(vec![csv, self.html_path.clone()])
    }
}

/// Human label for when the next sync happens.
pub fn countdown_label(interval: Option<Duration>) -> String {
    let Some(d) = interval else { return s!("Manual refresh") };
    let mins = d.as_secs().div_ceil(60);
    let (h, m) = (mins / 60, mins % 60);
    if h > 0 {
        format!("Next update in {h}h {m}m")
    } else {
        format!("Next update in {m}m")
    }
}
