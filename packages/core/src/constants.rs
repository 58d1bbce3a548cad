use std::env;
use std::path::PathBuf;

/// Days a proposal stays valid after creation
pub const PROPOSAL_VALIDITY_DAYS: i64 = 15;

/// Prefix of every human-readable proposal number
pub const PROPOSAL_NUMBER_PREFIX: &str = "SKZ";

/// Attempts made to find a free proposal number before giving up
pub const PROPOSAL_NUMBER_MAX_ATTEMPTS: usize = 10;

/// Get the path to the data directory (~/.skz)
pub fn skz_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".skz")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skz")
    }
}

/// Get the default database path (~/.skz/proposals.db)
pub fn default_database_path() -> PathBuf {
    skz_dir().join("proposals.db")
}
