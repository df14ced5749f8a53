// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod levels;
pub mod specs;
pub mod source;
pub mod sync;

pub mod csv;
pub mod file;
pub mod log;
pub mod progress;
pub mod report;
pub mod runner;
pub mod store;
