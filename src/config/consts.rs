// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://bitjita.com/api";
pub const USER_AGENT: &str = concat!("guild_tracker/", env!("CARGO_PKG_VERSION"));
pub const ROSTER_TIMEOUT_SECS: u64 = 20;
pub const PLAYER_TIMEOUT_SECS: u64 = 10;

// Roster
pub const SENTINEL_NAMES: &[&str] = &["count"];

// Level curve
pub const XP_GROWTH: f64 = 1.106;
pub const XP_BASE_COST: u64 = 640;
pub const MAX_LEVEL: usize = 120;

// Skills, in display order
pub const SKILLS: &[&str] = &[
    "Carpentry", "Construction", "Cooking", "Farming", "Fishing", "Foraging",
    "Forestry", "Hunting", "Leatherworking", "Masonry", "Merchanting", "Mining",
    "Sailing", "Scholar", "Slayer", "Smithing", "Tailoring", "Taming",
];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_CSV_FILE: &str = "guild_stats.csv";
pub const DEFAULT_HTML_FILE: &str = "index.html";
pub const DEFAULT_CONFIG_FILE: &str = "guild_tracker.toml";
pub const AVERAGE_ROW_NAME: &str = "GUILD AVERAGE";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Schedule
pub const SYNC_INTERVAL_SECS: u64 = 3600;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
