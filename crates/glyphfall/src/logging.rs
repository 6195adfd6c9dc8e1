//! Log file setup.
//!
//! The terminal is busy drawing the animation, so diagnostics go to
//! `glyphfall.log` in the platform data directory instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
const LOG_ENV: &str = "GLYPHFALL_LOG";

const LOG_FILE: &str = "glyphfall.log";

const DEFAULT_FILTER: &str = "glyphfall=info,glyphfall_grid=info,glyphfall_config=info";

/// Install the global subscriber. Returns the log file path, or `None` when
/// no log file could be opened; logging is then disabled.
pub fn init() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "glyphfall")?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).ok()?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
