//! Where wikitext keeps its files on disk
//!
//! One per-user directory holds `config.yaml`, user style sheets under
//! `styles/` and rolling logs under `logs/`. The directory is
//! `$XDG_CONFIG_HOME/wikitext` (falling back to `~/.config/wikitext`), or
//! `%APPDATA%\wikitext` on Windows.

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const APP_DIR: &str = "wikitext";

/// Layout of the wikitext directory rooted at some base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Use `root` itself as the wikitext directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The current user's wikitext directory, if the environment names one
    pub fn user() -> Option<Self> {
        user_base(
            env::var_os("XDG_CONFIG_HOME"),
            env::var_os("APPDATA"),
            dirs::home_dir(),
        )
        .map(|base| Self::at(base.join(APP_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.root.join("styles")
    }

    /// User override for the style sheet `id`
    pub fn style_file(&self, id: &str) -> PathBuf {
        self.styles_dir().join(format!("{}.yaml", id))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the logs directory (and the root above it) if missing
    pub fn ensure_logs_dir(&self) -> Result<PathBuf> {
        let logs = self.logs_dir();
        fs::create_dir_all(&logs)
            .with_context(|| format!("Failed to create directory {}", logs.display()))?;
        Ok(logs)
    }
}

/// Base directory that the app directory is created under.
///
/// An empty `XDG_CONFIG_HOME` counts as unset.
fn user_base(
    xdg_config_home: Option<OsString>,
    appdata: Option<OsString>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return appdata.filter(|v| !v.is_empty()).map(PathBuf::from);
    }
    xdg_config_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
}
