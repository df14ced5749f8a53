// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use crate::config::options::{AppOptions, BackfillMode};
use crate::progress::LogProgress;
use crate::report::FileReport;
use crate::runner::{log_report, run_cycle, run_loop};
use crate::source::BitjitaApi;

/// Sync a claim's skill levels into a CSV backup and an HTML table.
#[derive(Debug, Parser)]
#[command(name = "guild_tracker", version, about, long_about = None)]
pub struct Args {
    /// TOML config file (default: ./guild_tracker.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Claim whose members are tracked
    #[arg(long)]
    pub claim: Option<String>,

    /// Track a player by name instead of a claim (repeatable)
    #[arg(short, long = "player", value_name = "NAME")]
    pub players: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Seconds between cycles
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Concurrent player fetches
    #[arg(long)]
    pub workers: Option<usize>,

    /// Skill the table is sorted by
    #[arg(long)]
    pub primary_skill: Option<String>,

    /// Missing-skill policy: floor (count as level 1) or exclude
    #[arg(long, value_name = "MODE")]
    pub backfill: Option<BackfillMode>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Flags win over the config file.
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(claim) = &self.claim {
            opts.roster.claim_id = Some(claim.clone());
        }
        if !self.players.is_empty() {
            opts.roster.players = self.players.clone();
            if self.claim.is_none() {
                opts.roster.claim_id = None;
            }
        }
        if let Some(out) = &self.out {
            opts.export.out_dir = out.clone();
        }
        if self.once {
            opts.schedule.once = true;
        }
        if let Some(secs) = self.interval {
            opts.schedule.interval_secs = secs;
        }
        if let Some(n) = self.workers {
            opts.fetch.workers = n;
        }
        if let Some(skill) = &self.primary_skill {
            opts.aggregate.primary_skill = Some(skill.clone());
        }
        if let Some(mode) = self.backfill {
            opts.aggregate.backfill = mode;
        }
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    crate::log::init(args.verbose, args.log_file.as_deref()).wrap_err("opening log file")?;

    let mut opts = AppOptions::load(args.config.as_deref())?;
    args.apply(&mut opts);
    opts.validate()?;

    let curve = opts.curve.build()?;
    let api = BitjitaApi::new(&opts.fetch)?;
    let refresh = (!opts.schedule.once).then(|| opts.schedule.interval());
    let mut sink = FileReport::new(&opts.export, refresh);
    let mut progress = LogProgress::default();

    info!(out = %opts.export.out_dir.display(), "guild_tracker starting");

    if !opts.schedule.once {
        run_loop(&api, &opts, &curve, &mut sink, &mut progress);
    }

    let report = run_cycle(&api, &opts, &curve, &mut sink, Some(&mut progress))?;
    log_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let mut opts = AppOptions::from_toml(
            r#"
            [roster]
            claim_id = "111"
            [schedule]
            interval_secs = 60
            "#,
        )
        .unwrap();

        let args = Args::parse_from([
            "guild_tracker", "--claim", "222", "--once", "--workers", "2",
            "--backfill", "exclude", "--primary-skill", "Mining", "-o", "public",
        ]);
        args.apply(&mut opts);

        assert_eq!(opts.roster.claim_id.as_deref(), Some("222"));
        assert!(opts.schedule.once);
        assert_eq!(opts.schedule.interval_secs, 60);
        assert_eq!(opts.fetch.workers, 2);
        assert_eq!(opts.aggregate.backfill, BackfillMode::Exclude);
        assert_eq!(opts.aggregate.primary_skill.as_deref(), Some("Mining"));
        assert_eq!(opts.export.out_dir, PathBuf::from("public"));
    }

    #[test]
    fn player_flags_replace_a_configured_claim() {
        let mut opts = AppOptions::from_toml("[roster]\nclaim_id = \"111\"\n").unwrap();
        let args = Args::parse_from(["guild_tracker", "-p", "Ana", "-p", "Ejem"]);
        args.apply(&mut opts);

        assert_eq!(opts.roster.claim_id, None);
        assert_eq!(opts.roster.players, vec!["Ana", "Ejem"]);
    }

    #[test]
    fn bad_backfill_is_rejected() {
        assert!(Args::try_parse_from(["guild_tracker", "--backfill", "zero"]).is_err());
    }
}
