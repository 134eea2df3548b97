//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::RenamexConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<RenamexConfig, ApiError> {
        let config = MergeService::load()?;
        Self::check(config)
    }

    /// Load configuration with an explicit file layered above the global one.
    pub fn load_from_file(path: &Path) -> Result<RenamexConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load_from_file(path)?;
        Self::check(config)
    }

    fn check(config: RenamexConfig) -> Result<RenamexConfig, ApiError> {
        config.state.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
