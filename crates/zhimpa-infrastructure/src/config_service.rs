//! Configuration service.
//!
//! Loads the site configuration from `config.toml`
//! (default `~/.config/zhimpa/config.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use zhimpa_core::config::SiteConfig;
use zhimpa_core::error::{Result, ZhimpaError};

use crate::paths::ZhimpaPaths;

/// Resolves and reads the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path` when given, otherwise the default location.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => ZhimpaPaths::config_file()?,
        };
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration. A missing file yields the defaults.
    pub fn load(&self) -> Result<SiteConfig> {
        if !self.path.exists() {
            tracing::info!(
                "[ConfigService] No config at {:?}, using defaults",
                self.path
            );
            return Ok(SiteConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| {
            ZhimpaError::config(format!("Invalid config {:?}: {}", self.path, e))
        })?;

        tracing::debug!("[ConfigService] Loaded config from {:?}", self.path);
        Ok(config)
    }

    /// Renders `config` the way it would be written to `config.toml`.
    pub fn render(config: &SiteConfig) -> Result<String> {
        Ok(toml::to_string_pretty(config)?)
    }
}
