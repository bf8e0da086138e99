// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::errors::{ExternalError, Result};
use crate::types::Role;

/// Default port the ACME server uses for http-01 validation.
pub const DEFAULT_HTTP01_PORT: u16 = 80;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [authenticator]
/// exec = "/usr/local/bin/http01-setup"
/// exec-interpreter = "/bin/bash"
/// timeout = 300
///
/// [installer]
/// exec = "/usr/local/bin/deploy-cert"
///
/// [verify]
/// http01-port = 80
/// ```
///
/// All sections are optional. A missing `exec` is only reported when the
/// corresponding role is actually used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub authenticator: ExecSection,

    #[serde(default)]
    pub installer: ExecSection,

    #[serde(default)]
    pub verify: VerifySection,
}

/// `[authenticator]` / `[installer]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ExecSection {
    /// Path of the external executable.
    pub exec: Option<String>,

    /// Optional interpreter the executable is run through.
    pub exec_interpreter: Option<String>,

    /// Optional upper bound on the run time, in seconds.
    pub timeout: Option<u64>,
}

/// `[verify]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct VerifySection {
    #[serde(default = "default_http01_port")]
    pub http01_port: u16,
}

fn default_http01_port() -> u16 {
    DEFAULT_HTTP01_PORT
}

impl Default for VerifySection {
    fn default() -> Self {
        Self {
            http01_port: default_http01_port(),
        }
    }
}

/// Validated configuration.
///
/// Built from [`RawConfigFile`] via `TryFrom` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub authenticator: ExecConfig,
    pub installer: ExecConfig,
    pub http01_port: u16,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            authenticator: ExecConfig::from_section(Role::Authenticator, raw.authenticator),
            installer: ExecConfig::from_section(Role::Installer, raw.installer),
            http01_port: raw.verify.http01_port,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// Executable options for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    pub role: Role,
    pub exec: Option<String>,
    pub exec_interpreter: Option<String>,
    /// `None` waits for the child forever.
    pub timeout: Option<Duration>,
}

impl ExecConfig {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            exec: None,
            exec_interpreter: None,
            timeout: None,
        }
    }

    fn from_section(role: Role, section: ExecSection) -> Self {
        Self {
            role,
            exec: section.exec,
            exec_interpreter: section.exec_interpreter,
            timeout: section.timeout.map(Duration::from_secs),
        }
    }

    /// The configured executable path.
    ///
    /// Fails with [`ExternalError::Configuration`] when the path is absent or
    /// empty, so callers can bail out before anything is spawned.
    pub fn executable(&self) -> Result<&str> {
        match self.exec.as_deref() {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(ExternalError::Configuration(format!(
                "external executable not given for the {} (set `exec` in [{}] or pass {})",
                self.role,
                self.role,
                self.role.exec_flag()
            ))),
        }
    }

    /// The configured interpreter, treating an empty string as unset.
    pub fn interpreter(&self) -> Option<&str> {
        self.exec_interpreter.as_deref().filter(|s| !s.is_empty())
    }
}
