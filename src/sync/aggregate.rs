// src/sync/aggregate.rs
use std::collections::BTreeSet;

use tracing::warn;

use crate::config::options::{AggregateOptions, BackfillMode};
use crate::store::{AverageRow, GuildSnapshot, SkillLevels};

/// Merge per-player records into the final snapshot.
///
/// 1. Columns: skills present in at least one record. With a vocabulary they
///    follow its order and unknown skills are dropped; without one they are
///    alphabetical.
/// 2. Backfill: in `Floor` mode missing skills become level 1.
/// 3. Average: per-column mean over the values present, one decimal
///    (halfway values round to even).
/// 4. Sort by the primary skill, descending and stable. Records without the
///    primary skill go last.
pub fn aggregate(mut records: Vec<SkillLevels>, opts: &AggregateOptions) -> GuildSnapshot {
    let columns = resolve_columns(&records, &opts.skills);

    if !opts.skills.is_empty() {
        for r in &mut records {
            r.levels.retain(|skill, _| columns.contains(skill));
        }
    }

    if opts.backfill == BackfillMode::Floor {
        for r in &mut records {
            for col in &columns {
                r.levels.entry(col.clone()).or_insert(1);
            }
        }
    }

    let average = average_row(&records, &columns);
    let primary_skill = resolve_primary(&columns, opts.primary_skill.as_deref());

    if let Some(key) = primary_skill.as_deref() {
        // Vec::sort_by is stable; ties keep roster order.
        records.sort_by(|a, b| b.get(key).cmp(&a.get(key)));
    }

    GuildSnapshot { columns, primary_skill, players: records, average }
}

fn resolve_columns(records: &[SkillLevels], vocabulary: &[String]) -> Vec<String> {
    let seen: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.levels.keys().map(String::as_str))
        .collect();

    if vocabulary.is_empty() {
        return seen.into_iter().map(|s| s!(s)).collect();
    }

    let mut cols: Vec<String> = Vec::with_capacity(vocabulary.len());
    for skill in vocabulary {
        if seen.contains(skill.as_str()) && !cols.contains(skill) {
            cols.push(skill.clone());
        }
    }
    cols
}

fn average_row(records: &[SkillLevels], columns: &[String]) -> AverageRow {
    let mut avg = AverageRow::default();
    for col in columns {
        let (sum, n) = records
            .iter()
            .filter_map(|r| r.get(col))
            .fold((0u64, 0u32), |(sum, n), v| (sum + u64::from(v), n + 1));
        if n > 0 {
            avg.values.insert(col.clone(), round1(sum as f64 / f64::from(n)));
        }
    }
    avg
}

fn resolve_primary(columns: &[String], configured: Option<&str>) -> Option<String> {
    if let Some(want) = configured {
        if columns.iter().any(|c| c == want) {
            return Some(s!(want));
        }
        warn!(skill = want, "primary skill not in report, sorting by first column");
    }
    columns.first().cloned()
}

/// One decimal, ties to even: 2.25 -> 2.2, 2.75 -> 2.8.
fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn rec(name: &str, levels: &[(&str, u32)]) -> SkillLevels {
        levels
            .iter()
            .fold(SkillLevels::new(name, Local::now()), |r, (s, l)| r.with_level(*s, *l))
    }

    fn opts(skills: &[&str], primary: Option<&str>, backfill: BackfillMode) -> AggregateOptions {
        AggregateOptions {
            skills: skills.iter().map(|s| s!(*s)).collect(),
            primary_skill: primary.map(|s| s!(s)),
            backfill,
        }
    }

    fn names(s: &GuildSnapshot) -> Vec<&str> {
        s.players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn floor_backfill_counts_missing_as_level_one() {
        let snap = aggregate(
            vec![rec("P1", &[("A", 10), ("B", 20)]), rec("P2", &[("A", 30)])],
            &opts(&[], None, BackfillMode::Floor),
        );
        assert_eq!(snap.columns, vec!["A", "B"]);
        assert_eq!(snap.average.get("A"), Some(20.0));
        assert_eq!(snap.average.get("B"), Some(10.5));
        assert_eq!(snap.players.iter().find(|p| p.name == "P2").unwrap().get("B"), Some(1));
    }

    #[test]
    fn exclude_mode_leaves_gaps_out_of_the_mean() {
        let snap = aggregate(
            vec![rec("P1", &[("A", 10), ("B", 20)]), rec("P2", &[("A", 30)])],
            &opts(&[], None, BackfillMode::Exclude),
        );
        assert_eq!(snap.average.get("B"), Some(20.0));
        assert_eq!(snap.players.iter().find(|p| p.name == "P2").unwrap().get("B"), None);
    }

    #[test]
    fn stable_descending_sort_on_primary() {
        let snap = aggregate(
            vec![rec("P1", &[("A", 5)]), rec("P2", &[("A", 20)]), rec("P3", &[("A", 5)])],
            &opts(&[], Some("A"), BackfillMode::Floor),
        );
        assert_eq!(names(&snap), vec!["P2", "P1", "P3"]);
    }

    #[test]
    fn average_is_not_part_of_the_sort() {
        let snap = aggregate(
            vec![rec("Low", &[("A", 1)]), rec("High", &[("A", 99)])],
            &opts(&[], None, BackfillMode::Floor),
        );
        assert_eq!(names(&snap), vec!["High", "Low"]);
        let ds = snap.to_dataset();
        assert_eq!(ds.rows.last().unwrap()[0], crate::config::consts::AVERAGE_ROW_NAME);
        assert_eq!(ds.rows.last().unwrap()[2], "50.0");
    }

    #[test]
    fn vocabulary_orders_columns_and_drops_unknown_skills() {
        let snap = aggregate(
            vec![
                rec("P1", &[("Mining", 4), ("Hexing", 9)]),
                rec("P2", &[("Cooking", 2)]),
            ],
            &opts(&["Cooking", "Farming", "Mining", "Cooking"], None, BackfillMode::Floor),
        );
        assert_eq!(snap.columns, vec!["Cooking", "Mining"]);
        assert_eq!(snap.primary_skill.as_deref(), Some("Cooking"));
        assert!(snap.players.iter().all(|p| p.get("Hexing").is_none()));
        assert!(snap.average.get("Hexing").is_none());
        assert_eq!(names(&snap), vec!["P2", "P1"]);
    }

    #[test]
    fn unknown_primary_falls_back_to_first_column() {
        let snap = aggregate(
            vec![rec("P1", &[("A", 1), ("B", 9)]), rec("P2", &[("A", 3), ("B", 2)])],
            &opts(&[], Some("Nope"), BackfillMode::Floor),
        );
        assert_eq!(snap.primary_skill.as_deref(), Some("A"));
        assert_eq!(names(&snap), vec!["P2", "P1"]);
    }

    #[test]
    fn records_missing_primary_sort_last_in_exclude_mode() {
        let snap = aggregate(
            vec![rec("None", &[("B", 50)]), rec("Low", &[("A", 1)]), rec("High", &[("A", 8)])],
            &opts(&[], Some("A"), BackfillMode::Exclude),
        );
        assert_eq!(names(&snap), vec!["High", "Low", "None"]);
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let snap = aggregate(
            vec![rec("P1", &[("A", 1)]), rec("P2", &[("A", 1)]), rec("P3", &[("A", 2)])],
            &opts(&[], None, BackfillMode::Floor),
        );
        assert_eq!(snap.average.get("A"), Some(1.3));
    }

    #[test]
    fn halfway_averages_round_to_even() {
        let four = |a, b, c, d| {
            vec![rec("P1", &[("A", a)]), rec("P2", &[("A", b)]), rec("P3", &[("A", c)]), rec("P4", &[("A", d)])]
        };
        // 2.25 and 2.75 sit exactly halfway.
        let snap = aggregate(four(1, 2, 3, 3), &opts(&[], None, BackfillMode::Floor));
        assert_eq!(snap.average.get("A"), Some(2.2));
        let snap = aggregate(four(2, 3, 3, 3), &opts(&[], None, BackfillMode::Floor));
        assert_eq!(snap.average.get("A"), Some(2.8));
    }
}
