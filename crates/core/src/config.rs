//! TOML-based configuration for mergeview.
//!
//! Every section is optional; a missing file at the default location simply
//! means "use defaults". The engine itself is configuration-free: only the
//! file classifier and the host's rendering choices read from here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::diff::DiffMode;
use crate::errors::ConfigError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Extra extension tables for file classification.
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Diff rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classify
// ---------------------------------------------------------------------------

/// Additional extensions layered over the built-in classification tables.
///
/// Extensions are given without the leading dot and matched
/// case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub code_extensions: Vec<String>,

    #[serde(default)]
    pub document_extensions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// How the host renders diffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Algorithm used when diffing two full texts.
    #[serde(default)]
    pub mode: DiffMode,

    /// Show old/new line-number gutters.
    #[serde(default = "default_true")]
    pub line_numbers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: DiffMode::default(),
            line_numbers: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load an [`AppConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all values are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log.level".into(),
                detail: format!(
                    "unknown level '{}', expected one of {}",
                    self.log.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        validate_extensions("classify.code_extensions", &self.classify.code_extensions)?;
        validate_extensions(
            "classify.document_extensions",
            &self.classify.document_extensions,
        )?;

        for ext in &self.classify.code_extensions {
            let listed_twice = self
                .classify
                .document_extensions
                .iter()
                .any(|other| other.eq_ignore_ascii_case(ext));
            if listed_twice {
                return Err(ConfigError::InvalidValue {
                    field: "classify".into(),
                    detail: format!("extension '{}' is listed as both code and document", ext),
                });
            }
        }

        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// `<platform config dir>/mergeview/config.toml`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mergeview").join("config.toml"))
    }
}

fn validate_extensions(field: &str, extensions: &[String]) -> Result<(), ConfigError> {
    for ext in extensions {
        if ext.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.into(),
                detail: "extensions must not be empty".into(),
            });
        }
        if ext.contains('.') {
            return Err(ConfigError::InvalidValue {
                field: field.into(),
                detail: format!("extension '{}' must be given without a dot", ext),
            });
        }
    }
    Ok(())
}
