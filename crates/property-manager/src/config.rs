//! # Configuration
//!
//! Settings are managed by [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `PROPERTY_MANAGER_USAGE_NOTES`.
//! 2. **Settings file** (optional): a TOML file passed to [`Settings::load_from`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `usage_notes` | `PROPERTY_MANAGER_USAGE_NOTES` | `false` | Append usage notes to property documentation |
//!
//! Boolean environment values accept `1/0`, `yes/no`, `true/false` and
//! `on/off` (case-insensitive).

use std::path::Path;

use confique::Config;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::{PropertyError, Result};

pub const USAGE_NOTES_VARIABLE: &str = "PROPERTY_MANAGER_USAGE_NOTES";

/// Library settings.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Append usage notes to property documentation.
    #[config(env = "PROPERTY_MANAGER_USAGE_NOTES", parse_env = coerce_boolean, default = false)]
    pub usage_notes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { usage_notes: false }
    }
}

impl Settings {
    /// Load settings from the environment on top of the defaults.
    pub fn load() -> Result<Self> {
        Settings::builder()
            .env()
            .load()
            .map_err(|e| PropertyError::Config(e.to_string()))
    }

    /// Load settings from the environment and a TOML file, in that order of
    /// priority. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Settings::builder()
            .env()
            .file(path.as_ref())
            .load()
            .map_err(|e| PropertyError::Config(e.to_string()))
    }

    /// Load settings from a TOML file alone, ignoring the environment.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        Settings::builder()
            .file(path.as_ref())
            .load()
            .map_err(|e| PropertyError::Config(e.to_string()))
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(|| {
    Settings::load().unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to default settings");
        Settings::default()
    })
});

/// Process-wide settings, loaded from the environment on first use.
pub fn settings() -> &'static Settings {
    &SETTINGS
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid boolean value '{0}' (expected one of 1/0, yes/no, true/false, on/off)")]
pub struct InvalidBoolean(String);

/// Coerce a textual flag such as an environment variable to a boolean.
pub fn coerce_boolean(raw: &str) -> std::result::Result<bool, InvalidBoolean> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" | "" => Ok(false),
        _ => Err(InvalidBoolean(raw.to_string())),
    }
}
