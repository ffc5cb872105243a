//! Error types for the mergeview core library.
//!
//! The diff renderer and the conflict tracker are total and never fail; only
//! the surfaces that touch the filesystem (configuration and conflict
//! descriptors) return errors. Each has its own `thiserror` enum, and a
//! top-level [`CoreError`] unifies them for callers that want a single type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Conflict descriptor errors
// ---------------------------------------------------------------------------

/// Errors from reading or writing conflict descriptor JSON.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Descriptor file not found.
    #[error("conflict descriptor file not found: {0}")]
    FileNotFound(String),

    /// The JSON did not match the descriptor shape.
    #[error("conflict descriptor parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The changeset could not be encoded.
    #[error("conflict descriptor serialize error: {0}")]
    SerializeError(String),

    /// Generic I/O wrapper.
    #[error("conflict descriptor I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
