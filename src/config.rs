//! Widget configuration persistence
//!
//! Stores user preferences in `~/.config/wikitext/config.yaml`

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::click::CLICK_DEBOUNCE_MS;
use crate::config_paths::ConfigPaths;
use crate::registry::PatternSpec;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Fire a provisional selection on single click of an object reference
    #[serde(default)]
    pub allow_one_click: bool,

    /// Click debounce window in milliseconds
    #[serde(default = "default_click_debounce_ms")]
    pub click_debounce_ms: u64,

    /// Tokenize on a worker thread instead of inline after each edit
    #[serde(default)]
    pub background_tokenize: bool,

    /// Style sheet id (e.g., "default", "dark")
    #[serde(default = "default_style_sheet")]
    pub style_sheet: String,

    /// Extra patterns appended after the built-in wiki patterns
    #[serde(default)]
    pub patterns: Vec<PatternSpec>,
}

fn default_click_debounce_ms() -> u64 {
    CLICK_DEBOUNCE_MS
}

fn default_style_sheet() -> String {
    "default".to_string()
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            allow_one_click: false,
            click_debounce_ms: default_click_debounce_ms(),
            background_tokenize: false,
            style_sheet: default_style_sheet(),
            patterns: Vec::new(),
        }
    }
}

impl WikiConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = ConfigPaths::user().map(|paths| paths.config_file()) else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = ConfigPaths::user()
            .map(|paths| paths.config_file())
            .ok_or_else(|| anyhow!("No config directory available"))?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
