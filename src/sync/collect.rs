// src/sync/collect.rs
use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use tracing::{debug, warn};

use super::fetch::fetch_player;
use crate::config::options::FetchOptions;
use crate::error::PlayerError;
use crate::levels::LevelCurve;
use crate::progress::Progress;
use crate::source::StatsSource;
use crate::specs::roster::RosterEntry;
use crate::store::SkillLevels;

#[derive(Debug)]
pub struct SkippedPlayer {
    pub name: String,
    pub reason: PlayerError,
}

/// Outcome of fetching a whole roster. Both lists are in roster order.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<SkillLevels>,
    pub skipped: Vec<SkippedPlayer>,
}

/// Fetch every roster entry on up to `opts.workers` threads.
/// Per-player failures become skips. Results are re-joined by roster
/// position, so completion order never shows in the output.
pub fn collect_players<S: StatsSource + ?Sized>(
    source: &S,
    entries: &[RosterEntry],
    curve: &LevelCurve,
    opts: &FetchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Collected {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(entries.len());
    }

    let mut slots: Vec<Option<Result<SkillLevels, PlayerError>>> =
        entries.iter().map(|_| None).collect();

    if !entries.is_empty() {
        let counter = AtomicUsize::new(0);
        let (res_tx, res_rx) = mpsc::channel::<(usize, Result<SkillLevels, PlayerError>)>();
        let workers = opts.workers.min(entries.len()).max(1);
        let pause = opts.request_pause();
        debug!(workers, players = entries.len(), "starting fetch");

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = res_tx.clone();
                let counter = &counter;

                scope.spawn(move || loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= entries.len() {
                        break;
                    }
                    let result = fetch_player(source, &entries[i], curve);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    thread::sleep(pause); // be polite
                });
            }
            drop(res_tx); // main thread is sole receiver now

            for (i, result) in res_rx {
                let name = &entries[i].name;
                match &result {
                    Ok(_) => {
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_done(name);
                        }
                    }
                    Err(e) => {
                        warn!(player = %name, "skipped: {e}");
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_skipped(name, &e.to_string());
                        }
                    }
                }
                slots[i] = Some(result);
            }
        });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut out = Collected::default();
    for (entry, slot) in entries.iter().zip(slots) {
        match slot {
            Some(Ok(record)) => out.records.push(record),
            Some(Err(reason)) => out.skipped.push(SkippedPlayer { name: entry.name.clone(), reason }),
            None => {}
        }
    }
    out
}
