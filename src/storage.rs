//! Files kept under the workspace directory.
//!
//! The record collections are never persisted. The only files are the
//! workspace configuration and the logged-in user's session.

use std::path::{Path, PathBuf};

use crate::Config;

mod session;
pub use session::{Session, SessionError};

/// Name of the directory, relative to the workspace root, holding local state.
pub const WORKSPACE_DIR: &str = ".gearguard";

/// Path of the workspace directory under `root`.
#[must_use]
pub fn workspace_dir(root: &Path) -> PathBuf {
    root.join(WORKSPACE_DIR)
}

/// Path of the configuration file under `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    workspace_dir(root).join("config.toml")
}

/// Loads the workspace configuration, falling back to defaults if the file is
/// missing or cannot be parsed.
#[must_use]
pub fn load_config(root: &Path) -> Config {
    let path = config_path(root);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}
