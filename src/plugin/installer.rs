// src/plugin/installer.rs

//! External certificate installer.
//!
//! The configured executable receives five arguments, always in this order:
//! domain, certificate path, key path, chain path, fullchain path.

use std::collections::BTreeSet;

use crate::config::{ConfigFile, ExecConfig};
use crate::errors::{ExternalError, Result};
use crate::exec::DelegateRunner;
use crate::types::BoxFuture;

use super::{CertInstaller, CertKeyPaths, PluginInfo};

const INFO: PluginInfo = PluginInfo {
    name: "external-install",
    description: "Install certificates with given executable",
    more_info: "This plugin requires an executable that installs an issued certificate \
                into an external service.",
};

/// Domain and file paths of an issued certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub domain: String,
    pub cert_path: String,
    pub key_path: String,
    pub chain_path: String,
    pub fullchain_path: String,
}

#[derive(Debug, Clone)]
pub struct Installer {
    config: ExecConfig,
    runner: DelegateRunner,
}

impl Installer {
    pub fn new(config: ExecConfig, runner: DelegateRunner) -> Self {
        Self { config, runner }
    }

    pub fn from_config(cfg: &ConfigFile, runner: DelegateRunner) -> Self {
        Self::new(cfg.installer.clone(), runner)
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Run the install executable for `request`.
    pub async fn run_cert_install(&self, request: &InstallRequest) -> Result<()> {
        let result = self
            .runner
            .run_external(
                &self.config,
                &[
                    ("domain", request.domain.as_str()),
                    ("cert", request.cert_path.as_str()),
                    ("key", request.key_path.as_str()),
                    ("chain", request.chain_path.as_str()),
                    ("fullchain", request.fullchain_path.as_str()),
                ],
            )
            .await?;

        if !result.success() {
            return Err(ExternalError::Install {
                exec: self.config.executable()?.to_string(),
            });
        }

        self.runner
            .reporter()
            .info(&format!("certificate for {} installed", request.domain));
        Ok(())
    }
}

impl CertInstaller for Installer {
    fn info(&self) -> PluginInfo {
        INFO
    }

    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn deploy_cert<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run_cert_install(request))
    }

    // No server configuration is managed here, so the hooks below have
    // nothing to report and nothing to change.

    fn get_all_names(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn get_all_certs_keys(&self) -> Vec<CertKeyPaths> {
        Vec::new()
    }

    fn supported_enhancements(&self) -> Vec<String> {
        Vec::new()
    }

    fn enhance(&self, _domain: &str, _enhancement: &str, _options: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn save(&self, _title: Option<&str>, _temporary: bool) -> Result<()> {
        Ok(())
    }

    fn rollback_checkpoints(&self, _rollback: usize) -> Result<()> {
        Ok(())
    }

    fn recovery_routine(&self) -> Result<()> {
        Ok(())
    }

    fn view_config_changes(&self) -> Result<()> {
        Ok(())
    }

    fn config_test(&self) -> Result<()> {
        Ok(())
    }

    fn restart(&self) -> Result<()> {
        Ok(())
    }
}
