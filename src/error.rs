//! Error types for lorenz-trace.
//!
//! The simulation core only does arithmetic and bounded buffer writes, so
//! the failure surface is the configuration boundary: trace counts, buffer
//! capacities, frame budgets and the files they are loaded from.
//! Numerical blowup is not an error and never shows up here.

use thiserror::Error;

/// Result type alias for lorenz-trace operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Unified error type for all lorenz-trace operations.
#[derive(Debug, Error)]
pub enum TraceError {
    // ===== Configuration Errors =====
    /// The engine was asked to hold zero trajectories.
    #[error("Configuration error: trace count must be at least 1, got {count}")]
    InvalidTraceCount {
        /// Requested number of trajectories.
        count: usize,
    },

    /// A trace buffer was requested with zero capacity.
    #[error("Configuration error: trace buffer capacity must be at least 1, got {capacity}")]
    InvalidCapacity {
        /// Requested capacity in points.
        capacity: usize,
    },

    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TraceError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was raised at the configuration boundary.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTraceCount { .. }
                | Self::InvalidCapacity { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
