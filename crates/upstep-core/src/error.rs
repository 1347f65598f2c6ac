//! Error types for upstep-core

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// C001: Configuration file not found
    #[error("[C001] Configuration file not found: {path}")]
    NotFound { path: String },

    /// C002: YAML parsing failed
    #[error("[C002] Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// C003: A configuration value is invalid
    #[error("[C003] Invalid configuration: {message}")]
    Invalid { message: String },

    /// C004: IO error with file path context
    #[error("[C004] Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
