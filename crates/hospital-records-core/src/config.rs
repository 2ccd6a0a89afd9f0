//! Layered settings.
//!
//! Sources, later ones winning: built-in defaults, `config/default.toml`
//! (optional), an explicit file, then `HOSPITAL_*` environment variables
//! with `__` between nested keys (`HOSPITAL_DATABASE__PATH`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::validation::{TextRules, DEFAULT_MAX_LENGTH, MIN_MAX_LENGTH};

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub validation: ValidationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file, created on first open.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hospital.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Sanitizer cut-off, in characters.
    pub max_text_length: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from every source; `file`, when given, must exist.
    ///
    /// A text limit shorter than [`MIN_MAX_LENGTH`] is rejected.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false));
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder
            .add_source(
                Environment::with_prefix("HOSPITAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.validation.max_text_length < MIN_MAX_LENGTH {
            return Err(ConfigError::Message(format!(
                "validation.max_text_length must be at least {MIN_MAX_LENGTH}, got {}",
                self.validation.max_text_length
            )));
        }
        Ok(self)
    }

    /// Sanitization rules for the record services.
    pub fn text_rules(&self) -> TextRules {
        TextRules::new(self.validation.max_text_length)
    }
}
