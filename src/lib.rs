//! Mock Monero Daemon RPC
//!
//! A stand-in for `monerod`'s mining RPC surface, built to drive a merged-mining stratum
//! server's job generation and share validation without a real daemon:
//! - Byte-exact block template and hashing blobs
//! - A coinbase with a zeroed extra-nonce region for the merge-mining tag
//! - Height and prev hash that advance on every submitted block
//! - Permissive submission: every block is accepted

pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod rpc;
pub mod utils;

pub use config::Config;
pub use crate::core::{BlockTemplate, ChainState, ChainStateConfig};
pub use error::{Error, Result};

/// Application information
pub const APP_NAME: &str = "monero-rpc-mock";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
