//! Application configuration.
//!
//! There are no config files, flags or environment variables: every value
//! derives from the working directory and the build mode.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

/// Directory, relative to the working directory, holding note files.
pub const NOTES_DIR_NAME: &str = "project_folder";
/// Directory, relative to the working directory, holding rolling logs.
pub const LOG_DIR_NAME: &str = "logs";

/// Resolved paths and levels for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub notes_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Builds the default configuration rooted at `cwd`.
    pub fn from_working_dir(cwd: impl AsRef<Path>) -> Self {
        let cwd = cwd.as_ref();
        Self {
            notes_dir: cwd.join(NOTES_DIR_NAME),
            log_dir: cwd.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }
}
