//! JSON Configuration Management
//!
//! Loads the optional relay configuration file and layers CLI/environment
//! overrides on top of it. Validation happens once, after all layers are
//! applied.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{RelayConfig, RelayConfigUpdate};
use crate::utils::error::{AppError, AppResult};

/// Configuration service for relay settings
#[derive(Debug, Default)]
pub struct ConfigService {
    config_path: Option<PathBuf>,
    config: RelayConfig,
}

impl ConfigService {
    /// Load configuration from `path`, or start from defaults when no file is given.
    ///
    /// A path that is given but missing is an error.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => RelayConfig::default(),
        };

        Ok(Self {
            config_path: path.map(Path::to_path_buf),
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<RelayConfig> {
        if !path.exists() {
            return Err(AppError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let config: RelayConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    pub fn save_to_file(path: &Path, config: &RelayConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Path the configuration was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &RelayConfig {
        &self.config
    }

    /// Layer a partial update over the loaded configuration
    pub fn apply_update(&mut self, update: RelayConfigUpdate) {
        self.config.apply_update(update);
    }

    /// Validate and return the effective configuration
    pub fn finalize(self) -> AppResult<RelayConfig> {
        self.config.validate().map_err(AppError::validation)?;
        Ok(self.config)
    }
}
