// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StepdagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.scheduler, raw.input))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_scheduler(cfg)?;
    validate_input(cfg)?;
    Ok(())
}

fn validate_scheduler(cfg: &RawConfigFile) -> Result<()> {
    // The preset is strongly typed and validated during deserialization.

    if cfg.scheduler.workers == Some(0) {
        return Err(StepdagError::ConfigError(
            "[scheduler].workers must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_input(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = &cfg.input.path {
        if path.as_os_str().is_empty() {
            return Err(StepdagError::ConfigError(
                "[input].path must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
