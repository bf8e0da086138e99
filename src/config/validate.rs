// src/config/validate.rs

use crate::config::model::{ConfigFile, ExecSection, RawConfigFile};
use crate::errors::{ExternalError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ExternalError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Check value sanity of a raw config.
///
/// A missing executable passes; it is a call-time error of the role that
/// needs it.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_exec_section("authenticator", &cfg.authenticator)?;
    validate_exec_section("installer", &cfg.installer)?;

    if cfg.verify.http01_port == 0 {
        return Err(ExternalError::Configuration(
            "[verify].http01-port must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_exec_section(name: &str, section: &ExecSection) -> Result<()> {
    if section.timeout == Some(0) {
        return Err(ExternalError::Configuration(format!(
            "[{name}].timeout must be >= 1 second (got 0); omit it to wait indefinitely"
        )));
    }

    if let Some(exec) = section.exec.as_deref() {
        if !exec.is_empty() && exec.trim().is_empty() {
            return Err(ExternalError::Configuration(format!(
                "[{name}].exec must not be blank"
            )));
        }
    }

    Ok(())
}
