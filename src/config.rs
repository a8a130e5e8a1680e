//! Configuration management for the mock daemon
//!
//! Settings come from an optional YAML/JSON file, overridden by command line flags and
//! their environment variables. Defaults reproduce the stock mock exactly, so a bare
//! invocation serves the same chain every time.

use crate::core::ChainStateConfig;
use crate::error::{Error, Result};
use crate::utils::parse_hash;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(
    name = "monero-rpc-mock",
    version,
    about = "Mock Monero daemon RPC server",
    long_about = "Serves the daemon's mining JSON-RPC methods from memory so a merged-mining \
                  stratum server can be tested without a real daemon"
)]
pub struct Args {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "MOCK_RPC_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MOCK_RPC_PORT")]
    pub port: Option<u16>,

    /// Height of the first block template
    #[arg(long, env = "MOCK_INITIAL_HEIGHT")]
    pub initial_height: Option<u64>,

    /// Fixed network difficulty
    #[arg(short, long, env = "MOCK_DIFFICULTY")]
    pub difficulty: Option<u64>,

    /// RandomX seed hash (64 hex characters)
    #[arg(long)]
    pub seed_hash: Option<String>,

    /// Prev hash of the first template (64 hex characters)
    #[arg(long)]
    pub prev_hash: Option<String>,

    /// Log level
    #[arg(short, long, env = "MOCK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (plain, json)
    #[arg(long, env = "MOCK_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Initial chain state
    #[serde(default)]
    pub chain: ChainConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Initial chain state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Height of the first block template
    #[serde(default = "default_height")]
    pub initial_height: u64,

    /// Fixed network difficulty
    #[serde(default = "default_difficulty")]
    pub difficulty: u64,

    /// RandomX seed hash, hex
    #[serde(default = "default_seed_hash")]
    pub seed_hash: String,

    /// Prev hash of the first template, hex
    #[serde(default = "default_prev_hash")]
    pub prev_hash: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (plain, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18081
}

fn default_height() -> u64 {
    1_000_000
}

fn default_difficulty() -> u64 {
    100_000
}

fn default_seed_hash() -> String {
    "0".repeat(64)
}

fn default_prev_hash() -> String {
    "1".repeat(64)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            initial_height: default_height(),
            difficulty: default_difficulty(),
            seed_hash: default_seed_hash(),
            prev_hash: default_prev_hash(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from command-line arguments, layered over the config file
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = &args.host {
            config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(height) = args.initial_height {
            config.chain.initial_height = height;
        }
        if let Some(difficulty) = args.difficulty {
            config.chain.difficulty = difficulty;
        }
        if let Some(seed_hash) = &args.seed_hash {
            config.chain.seed_hash = seed_hash.clone();
        }
        if let Some(prev_hash) = &args.prev_hash {
            config.chain.prev_hash = prev_hash.clone();
        }
        if let Some(level) = &args.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &args.log_format {
            config.logging.format = format.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(Error::config(format!(
                "Invalid bind address: {}",
                self.server.host
            )));
        }

        if self.chain.initial_height == u64::MAX {
            return Err(Error::config("Initial height must leave room to advance"));
        }

        if self.chain.difficulty == 0 {
            return Err(Error::config("Difficulty must be greater than 0"));
        }

        parse_hash(&self.chain.seed_hash)
            .map_err(|e| Error::config(format!("Invalid seed hash: {}", e)))?;
        parse_hash(&self.chain.prev_hash)
            .map_err(|e| Error::config(format!("Invalid prev hash: {}", e)))?;

        match self.logging.format.as_str() {
            "plain" | "json" => Ok(()),
            other => Err(Error::config(format!("Unknown log format: {}", other))),
        }
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| Error::config(format!("Invalid bind address: {}", e)))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Initial values for the chain state
    pub fn chain_state(&self) -> Result<ChainStateConfig> {
        Ok(ChainStateConfig {
            height: self.chain.initial_height,
            difficulty: self.chain.difficulty,
            seed_hash: parse_hash(&self.chain.seed_hash)?,
            prev_hash: parse_hash(&self.chain.prev_hash)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 18081);
        assert_eq!(config.chain.initial_height, 1_000_000);
        assert_eq!(config.chain.difficulty, 100_000);
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_state().unwrap(), ChainStateConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.server.host = "localhost".to_string();
        assert!(config.validate().is_err());
        config.server.host = "127.0.0.1".to_string();

        config.chain.difficulty = 0;
        assert!(config.validate().is_err());
        config.chain.difficulty = 1;

        config.chain.initial_height = u64::MAX;
        assert!(config.validate().is_err());
        config.chain.initial_height = u64::MAX - 1;
        assert!(config.validate().is_ok());
        config.chain.initial_height = 0;

        config.chain.seed_hash = "abc".to_string();
        assert!(config.validate().is_err());
        config.chain.seed_hash = default_seed_hash();

        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
        config.logging.format = "json".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml_content = r#"
server:
  port: 28081
chain:
  initial_height: 2048
  difficulty: 5
"#;

        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(temp_file, "{}", yaml_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 28081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chain.initial_height, 2048);
        assert_eq!(config.chain.difficulty, 5);
        assert_eq!(config.chain.prev_hash, "1".repeat(64));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_json() {
        let json_content = r#"{"server": {"host": "127.0.0.1"}, "logging": {"format": "json"}}"#;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, "{}", json_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 18081);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_args_override_file() {
        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(temp_file, "server:\n  port: 28081\n").unwrap();

        let args = Args::try_parse_from([
            "monero-rpc-mock",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--port",
            "38081",
            "--initial-height",
            "5",
        ])
        .unwrap();

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.server.port, 38081);
        assert_eq!(config.chain.initial_height, 5);
        assert_eq!(config.socket_addr().unwrap().port(), 38081);
    }

    #[test]
    fn test_invalid_prev_hash_arg() {
        let args = Args {
            prev_hash: Some("xyz".to_string()),
            ..Args::default()
        };
        assert!(Config::from_args(&args).is_err());
    }

    #[test]
    fn test_config_serialization() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("chain:"));
        assert!(yaml.contains("logging:"));

        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
