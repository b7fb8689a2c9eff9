//! Default file locations.
//!
//! ```text
//! ~/.config/zhimpa/            # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Site configuration
//! └── session.json             # Session entries for the `file` storage backend
//! ```

use std::path::PathBuf;

use zhimpa_core::error::{Result, ZhimpaError};

const APP_DIR: &str = "zhimpa";

pub struct ZhimpaPaths;

impl ZhimpaPaths {
    /// Returns the configuration directory (e.g. `~/.config/zhimpa/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ZhimpaError::config("Cannot find configuration directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the file-backed session store.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
