//! Configuration file loading for glyphfall.
//!
//! Settings live in `config.toml` under the platform config directory, or at
//! the path named by `GLYPHFALL_CONFIG`. A missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphfall_core::{AnimationConfig, AnimationOptions, ConfigError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "GLYPHFALL_CONFIG";

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Highest frame rate the terminal loop accepts.
const MAX_FPS: u32 = 240;

/// Failure while loading settings.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid [animation] settings: {0}")]
    Animation(#[from] ConfigError),
    #[error("fps must be between 1 and 240, got {0}")]
    Fps(u32),
}

/// Everything read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Overrides applied on top of the animation defaults.
    pub animation: AnimationOptions,
    /// Settings for the terminal host.
    pub runtime: RuntimeSettings,
}

/// Settings for the terminal host loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Target frames per second.
    pub fps: u32,
    /// Fixed random seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self { fps: 60, seed: None }
    }
}

impl Settings {
    /// Parse settings from TOML text. Call [`validate`](Self::validate) afterwards.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Check values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), LoadError> {
        AnimationConfig::from_options(&self.animation)?;
        if !(1..=MAX_FPS).contains(&self.runtime.fps) {
            return Err(LoadError::Fps(self.runtime.fps));
        }
        Ok(())
    }
}

/// Default location of the config file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "glyphfall").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Path to load: `GLYPHFALL_CONFIG` if set, else the platform default.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// Load settings from the resolved config path.
pub fn load() -> Result<Settings, LoadError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            debug!("no config directory on this platform, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Load settings from `path`. A missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Settings, LoadError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings = Settings::from_toml_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    info!(path = %path.display(), "loaded config");
    Ok(settings)
}
