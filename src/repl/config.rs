//! REPL configuration
//!
//! Read from `<config_dir>/plotscript/config.toml`:
//!
//! ```toml
//! prompt = "plotscript> "
//! history_file = "/home/me/.local/share/plotscript/history"
//! history_size = 1000
//! startup_file = "/home/me/plots/startup.pls"
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

const APP_DIR: &str = "plotscript";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// `None` disables history persistence
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    /// Replaces the embedded startup program when set
    pub startup_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: "plotscript> ".to_string(),
            history_file: dirs::data_dir().map(|dir| dir.join(APP_DIR).join("history")),
            history_size: 1000,
            startup_file: None,
        }
    }
}

impl ReplConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`. A missing file yields the defaults;
    /// an unreadable or malformed one is reported and also yields them.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no REPL config file, using defaults");
            return Self::default();
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read REPL config");
                return Self::default();
            }
        };

        Self::from_toml(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed REPL config, using defaults");
            Self::default()
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
