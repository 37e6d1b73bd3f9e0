// File: src/config.rs
// Purpose: Configuration parsing from widgets.toml

use crate::error::WidgetError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Widget configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub serialize: SerializeOptions,
}

/// Options for the form serializer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Fail on custom-field groups no widget claims, instead of omitting them
    #[serde(default = "default_false")]
    pub strict_markers: bool,

    /// Omit falsy values (false, 0, "", NaN), like a plain `if (value)` check
    #[serde(default = "default_false")]
    pub drop_falsy: bool,
}

fn default_false() -> bool {
    false
}

impl SerializeOptions {
    pub fn strict() -> Self {
        Self {
            strict_markers: true,
            ..Self::default()
        }
    }
}

impl WidgetsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./widgets.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("widgets.toml")
    }

    /// Parse configuration from TOML text; empty text means defaults
    pub fn from_toml(content: &str) -> std::result::Result<Self, WidgetError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).map_err(|e| WidgetError::Config(e.to_string()))
    }
}
