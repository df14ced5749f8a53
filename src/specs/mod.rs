// src/specs/mod.rs
//! # Payload decoders
//!
//! Each module knows the shape of one upstream payload and how to turn it into
//! the crate's own types. Nothing in here performs I/O.
//!
//! ## What lives here
//! - **Shape classification** of loosely structured responses (the roster can
//!   be a bare list, a list of names, or an object wrapping either under
//!   `members`). Classification happens once, at ingestion.
//! - **Tolerant decoding**: identifiers may be strings or numbers, optional
//!   fields default, unknown fields are ignored.
//! - **Light shaping** into `RosterEntry` / `SkillLevels`.
//!
//! ## What does **not** live here
//! - **Transport** (`core::net`, `source`).
//! - **Skip policy and logging** (`sync::fetch`).
//! - **Averages, ordering, output** (`sync::aggregate`, `store`, `report`).
//!
//! ## Typical call chain
//! ```text
//! runner → source::StatsSource::fetch_roster → specs::roster::resolve
//!        → sync::collect → sync::fetch → specs::player::flatten
//! ```
//!
//! ## Testing notes
//! Decoders are tested offline against inline JSON fixtures.
pub mod player;
pub mod roster;
