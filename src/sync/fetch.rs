// src/sync/fetch.rs
use chrono::Local;
use tracing::debug;

use crate::error::PlayerError;
use crate::levels::LevelCurve;
use crate::source::StatsSource;
use crate::specs::player::flatten;
use crate::specs::roster::RosterEntry;
use crate::store::SkillLevels;

/// Resolve, fetch and flatten one roster entry.
/// Entries without an identifier are looked up by name first; the first
/// candidate wins.
pub fn fetch_player<S: StatsSource + ?Sized>(
    source: &S,
    entry: &RosterEntry,
    curve: &LevelCurve,
) -> Result<SkillLevels, PlayerError> {
    let fetch_err = |source| PlayerError::Fetch { name: entry.name.clone(), source };

    let id = match &entry.id {
        Some(id) => id.clone(),
        None => {
            let candidates = source.search_player_by_name(&entry.name).map_err(fetch_err)?;
            if candidates.len() > 1 {
                debug!(name = %entry.name, n = candidates.len(), "several search hits, using the first");
            }
            candidates
                .into_iter()
                .next()
                .ok_or_else(|| PlayerError::Resolution { name: entry.name.clone() })?
        }
    };

    let detail = source.fetch_player_detail(&id).map_err(fetch_err)?;

    let mut record = SkillLevels::new(entry.name.clone(), Local::now());
    record.levels = flatten(&detail, curve);
    Ok(record)
}
