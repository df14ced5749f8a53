// src/sync/mod.rs
mod aggregate;
mod collect;
mod fetch;

pub use aggregate::aggregate;
pub use collect::{collect_players, Collected, SkippedPlayer};
pub use fetch::fetch_player;
