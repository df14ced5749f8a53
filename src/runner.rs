// src/runner.rs
use std::thread;

use chrono::Local;
use tracing::{error, info};

use crate::config::options::{AppOptions, RosterSource};
use crate::error::SyncError;
use crate::levels::LevelCurve;
use crate::progress::Progress;
use crate::report::{countdown_label, ReportSink};
use crate::source::StatsSource;
use crate::specs::roster::{self, RosterEntry};
use crate::store::GuildSnapshot;
use crate::sync::{aggregate, collect_players, SkippedPlayer};

/// Outcome of one successful cycle.
#[derive(Debug)]
pub struct SyncReport {
    pub snapshot: GuildSnapshot,
    pub skipped: Vec<SkippedPlayer>,
    pub files_written: Vec<std::path::PathBuf>,
}

impl SyncReport {
    pub fn synced(&self) -> usize { self.snapshot.players.len() }
}

/// One full sync: roster → players → snapshot → report.
/// Nothing is emitted unless at least one player synced.
pub fn run_cycle<S: StatsSource + ?Sized>(
    source: &S,
    opts: &AppOptions,
    curve: &LevelCurve,
    sink: &mut dyn ReportSink,
    progress: Option<&mut dyn Progress>,
) -> Result<SyncReport, SyncError> {
    let entries = load_roster(source, opts)?;
    if entries.is_empty() {
        return Err(SyncError::EmptyResult { skipped: 0 });
    }

    let collected = collect_players(source, &entries, curve, &opts.fetch, progress);
    if collected.records.is_empty() {
        return Err(SyncError::EmptyResult { skipped: collected.skipped.len() });
    }

    let snapshot = aggregate(collected.records, &opts.aggregate);
    let interval = (!opts.schedule.once).then(|| opts.schedule.interval());
    let files_written = sink.emit(&snapshot, &countdown_label(interval), Local::now())?;

    Ok(SyncReport { snapshot, skipped: collected.skipped, files_written })
}

fn load_roster<S: StatsSource + ?Sized>(
    source: &S,
    opts: &AppOptions,
) -> Result<Vec<RosterEntry>, SyncError> {
    let sentinels = &opts.roster.sentinels;
    match opts.roster.source() {
        Some(RosterSource::Claim(claim_id)) => {
            let payload = source
                .fetch_roster(&claim_id)
                .map_err(|source| SyncError::RosterFetch { claim_id: claim_id.clone(), source })?;
            Ok(roster::resolve(payload, sentinels)?)
        }
        Some(RosterSource::Names(names)) => Ok(roster::from_names(&names, sentinels)),
        None => Ok(Vec::new()),
    }
}

/// Run cycles forever, sleeping `opts.schedule.interval()` between them.
/// Failed cycles are logged; the previous report stays in place.
pub fn run_loop<S: StatsSource + ?Sized>(
    source: &S,
    opts: &AppOptions,
    curve: &LevelCurve,
    sink: &mut dyn ReportSink,
    progress: &mut dyn Progress,
) -> ! {
    let interval = opts.schedule.interval();
    loop {
        match run_cycle(source, opts, curve, sink, Some(&mut *progress)) {
            Ok(report) => log_report(&report),
            Err(e) => error!("sync failed: {e}"),
        }
        info!("next sync in {}s", interval.as_secs());
        thread::sleep(interval);
    }
}

pub fn log_report(report: &SyncReport) {
    info!(synced = report.synced(), skipped = report.skipped.len(), "sync complete");
    if !report.skipped.is_empty() {
        let names: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
        info!("left out: {}", names.join(", "));
    }
}
