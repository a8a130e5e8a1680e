//! Utility functions and helpers

use crate::core::constants::HASH_SIZE;
use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize logging based on configuration
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init_logging(level: &str, format: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
    }
}

/// Get current timestamp in seconds since Unix epoch
pub fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Parse a 64-character hex string into a 32-byte hash
pub fn parse_hash(s: &str) -> Result<[u8; HASH_SIZE]> {
    if s.len() != HASH_SIZE * 2 {
        return Err(Error::config(format!(
            "Expected {} hex characters, got {}",
            HASH_SIZE * 2,
            s.len()
        )));
    }

    let mut out = [0u8; HASH_SIZE];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

/// Render a difficulty the way the daemon's `wide_difficulty` field does
pub fn wide_difficulty(difficulty: u64) -> String {
    format!("{:#x}", difficulty)
}
