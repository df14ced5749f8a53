// src/progress.rs
use tracing::info;

/// Lightweight progress reporting for a sync cycle.
/// Frontends implement this to surface status; every skip is reported.
pub trait Progress {
    /// Called at the start with the number of roster entries.
    fn begin(&mut self, _total: usize) {}

    /// A player was synced.
    fn item_done(&mut self, _name: &str) {}

    /// A player was left out of the snapshot.
    fn item_skipped(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Writes progress to the tracing subscriber.
#[derive(Default)]
pub struct LogProgress {
    done: usize,
    skipped: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        *self = Self { total, ..Self::default() };
        info!("Syncing {total} players");
    }
    fn item_done(&mut self, name: &str) {
        self.done += 1;
        info!("Synced {name} ({}/{})", self.done + self.skipped, self.total);
    }
    fn item_skipped(&mut self, name: &str, _reason: &str) {
        // The reason is already logged where the skip happened.
        self.skipped += 1;
        info!("Skipped {name} ({}/{})", self.done + self.skipped, self.total);
    }
    fn finish(&mut self) {
        info!("Fetch complete: {} synced, {} skipped", self.done, self.skipped);
    }
}
