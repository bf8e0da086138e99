// src/plugin/mod.rs

//! The two roles the host drives.
//!
//! They are independent capabilities rather than a hierarchy: the
//! [`Authenticator`] answers http-01 challenges, the [`Installer`] deploys
//! issued certificates. The only thing they share is the
//! [`DelegateRunner`](crate::exec::DelegateRunner).

pub mod authenticator;
pub mod installer;

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::challenge::{ChallengeRequest, ChallengeType, Http01Response};
use crate::errors::Result;
use crate::types::BoxFuture;

pub use authenticator::Authenticator;
pub use installer::{InstallRequest, Installer};

/// Static description of a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub more_info: &'static str,
}

/// Certificate, key and config file managed by an installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertKeyPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub config: PathBuf,
}

/// Satisfies pending challenges.
pub trait ChallengeDelegate: Send + Sync {
    fn info(&self) -> PluginInfo;

    fn prepare(&self) -> Result<()>;

    /// Challenge types this delegate can answer for `domain`, most preferred
    /// first.
    fn get_chall_pref(&self, domain: &str) -> Vec<ChallengeType>;

    /// Answer every challenge, in order. The first failure aborts the rest.
    fn perform<'a>(
        &'a self,
        achalls: &'a [ChallengeRequest],
    ) -> BoxFuture<'a, Result<Vec<Http01Response>>>;

    fn cleanup(&self, achalls: &[ChallengeRequest]) -> Result<()>;
}

/// Deploys issued certificates.
///
/// Apart from [`deploy_cert`](Self::deploy_cert) these are lifecycle hooks of
/// installers that manage server configuration.
pub trait CertInstaller: Send + Sync {
    fn info(&self) -> PluginInfo;

    fn prepare(&self) -> Result<()>;

    fn deploy_cert<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>>;

    fn get_all_names(&self) -> BTreeSet<String>;

    fn get_all_certs_keys(&self) -> Vec<CertKeyPaths>;

    fn supported_enhancements(&self) -> Vec<String>;

    fn enhance(&self, domain: &str, enhancement: &str, options: Option<&str>) -> Result<()>;

    fn save(&self, title: Option<&str>, temporary: bool) -> Result<()>;

    fn rollback_checkpoints(&self, rollback: usize) -> Result<()>;

    fn recovery_routine(&self) -> Result<()>;

    fn view_config_changes(&self) -> Result<()>;

    fn config_test(&self) -> Result<()>;

    fn restart(&self) -> Result<()>;
}
