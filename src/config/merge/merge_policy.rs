//! Base builder seeded with the serialized defaults.

use crate::config::RenamexConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&RenamexConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
