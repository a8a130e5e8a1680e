//! Error handling for the mock daemon
//!
//! Template construction and block submission never fail; the errors here come from
//! configuration, startup and the few decoding helpers used around the RPC boundary.

use thiserror::Error;

/// Result type alias for mock daemon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mock daemon
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Hex decoding errors
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Listener and server errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Malformed varint input
    #[error("Invalid varint: {message}")]
    Varint { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a varint decoding error
    pub fn varint(message: impl Into<String>) -> Self {
        Self::Varint {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::Io(_) => "io",
            Error::Hex(_) => "hex",
            Error::Config { .. } => "config",
            Error::Network { .. } => "network",
            Error::Varint { .. } => "varint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing field");
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = Error::varint("truncated");
        assert_eq!(err.to_string(), "Invalid varint: truncated");
    }

    #[test]
    fn test_error_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), "io");

        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.category(), "json");

        let hex_err = hex::decode("zz").unwrap_err();
        let err: Error = hex_err.into();
        assert_eq!(err.category(), "hex");
    }
}
