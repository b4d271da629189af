//! User settings, read from `settings.json` in the platform config directory.
//!
//! Every field is optional; a missing file means defaults.

use crate::constants::SETTINGS_FILE_NAME;
use crate::error::AppError;
use crate::lifecycle::QuitPolicy;
use crate::models::MatchMode;
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// What to do once every window is closed and nothing vetoes the exit
    pub quit_policy: QuitPolicy,
    pub match_mode: MatchMode,
    /// Start monitoring as soon as the host is ready
    pub auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quit_policy: QuitPolicy::platform_default(),
            match_mode: MatchMode::default(),
            auto_start: true,
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Read settings from the platform config directory, falling back to the
    /// defaults when the file cannot be located or parsed.
    pub fn load_or_default() -> Self {
        let path = match settings_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("Using default settings: {e}");
                return Self::default();
            }
        };

        match Self::load(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring unreadable settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

pub fn settings_path() -> Result<PathBuf, AppError> {
    let proj_dirs =
        ProjectDirs::from("com", "scrollstop", "ScrollStop").ok_or(AppError::NoProjectDirs)?;
    Ok(proj_dirs.config_dir().join(SETTINGS_FILE_NAME))
}
