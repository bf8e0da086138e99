// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::ConfigOverrides;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ExternalError, Result};

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// value checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration for a CLI run.
///
/// - An explicit `--config` path must exist.
/// - Otherwise [`default_config_path`] is used if present, else defaults.
/// - CLI overrides are applied last, then the result is validated.
pub fn resolve(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<ConfigFile> {
    let mut raw = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ExternalError::Configuration(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "loading config file");
            load_from_path(path)?
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(path = %path.display(), "loading default config file");
                load_from_path(&path)?
            } else {
                debug!("no config file found, using defaults");
                RawConfigFile::default()
            }
        }
    };

    apply_overrides(&mut raw, overrides);
    ConfigFile::try_from(raw)
}

/// Apply CLI overrides on top of a raw config. Only options that were given
/// on the command line replace file values.
pub fn apply_overrides(raw: &mut RawConfigFile, overrides: &ConfigOverrides) {
    if let Some(exec) = &overrides.auth_exec {
        raw.authenticator.exec = Some(exec.clone());
    }
    if let Some(interp) = &overrides.auth_exec_interpreter {
        raw.authenticator.exec_interpreter = Some(interp.clone());
    }
    if let Some(exec) = &overrides.install_exec {
        raw.installer.exec = Some(exec.clone());
    }
    if let Some(interp) = &overrides.install_exec_interpreter {
        raw.installer.exec_interpreter = Some(interp.clone());
    }
    if let Some(port) = overrides.http01_port {
        raw.verify.http01_port = port;
    }
}

/// Default config location: `acme-external.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("acme-external.toml")
}
