// src/plugin/authenticator.rs

//! External http-01 authenticator.
//!
//! The configured executable receives two arguments, the challenge path and
//! the validation string. It has to make the validation string retrievable
//! at that path on the external HTTP server and exit with code 0 once the
//! server is ready.

use tracing::{info, warn};

use crate::challenge::{ChallengeRequest, ChallengeType, Http01Response};
use crate::config::{ConfigFile, ExecConfig};
use crate::errors::{ExternalError, Result};
use crate::exec::DelegateRunner;
use crate::types::BoxFuture;

use super::{ChallengeDelegate, PluginInfo};

const INFO: PluginInfo = PluginInfo {
    name: "external-auth",
    description: "Configure web server(s) with given executable",
    more_info: "This plugin requires an executable to set up an external HTTP server \
                for solving http-01 challenges.",
};

#[derive(Debug, Clone)]
pub struct Authenticator {
    config: ExecConfig,
    http01_port: u16,
    runner: DelegateRunner,
}

impl Authenticator {
    pub fn new(config: ExecConfig, http01_port: u16, runner: DelegateRunner) -> Self {
        Self {
            config,
            http01_port,
            runner,
        }
    }

    pub fn from_config(cfg: &ConfigFile, runner: DelegateRunner) -> Self {
        Self::new(cfg.authenticator.clone(), cfg.http01_port, runner)
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Run the challenge executable with `uri` (path only) and `validation`.
    ///
    /// Returns whether it exited with code 0.
    pub async fn run_challenge_setup(&self, uri: &str, validation: &str) -> Result<bool> {
        let result = self
            .runner
            .run_external(&self.config, &[("uri", uri), ("content", validation)])
            .await?;
        Ok(result.success())
    }

    async fn perform_single(&self, achall: &ChallengeRequest) -> Result<Http01Response> {
        let (response, validation) = achall.response_and_validation();

        let url = achall.uri();
        self.runner.reporter().console(&format!(
            "Setting up external web server to display the following content at\n\
             {url}:\n\n{validation}\n\n"
        ));

        if !self
            .run_challenge_setup(&achall.challenge.path(), &validation)
            .await?
        {
            return Err(ExternalError::Execution {
                exec: self.config.executable()?.to_string(),
            });
        }

        if response
            .simple_verify(
                &achall.challenge,
                &achall.domain,
                &achall.account_key,
                self.http01_port,
            )
            .await
        {
            info!(domain = %achall.domain, "self-verify of challenge succeeded");
        } else {
            warn!(domain = %achall.domain, "Self-verify of challenge failed.");
        }

        Ok(response)
    }
}

impl ChallengeDelegate for Authenticator {
    fn info(&self) -> PluginInfo {
        INFO
    }

    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn get_chall_pref(&self, _domain: &str) -> Vec<ChallengeType> {
        vec![ChallengeType::Http01]
    }

    fn perform<'a>(
        &'a self,
        achalls: &'a [ChallengeRequest],
    ) -> BoxFuture<'a, Result<Vec<Http01Response>>> {
        Box::pin(async move {
            let mut responses = Vec::with_capacity(achalls.len());
            for achall in achalls {
                responses.push(self.perform_single(achall).await?);
            }
            Ok(responses)
        })
    }

    fn cleanup(&self, _achalls: &[ChallengeRequest]) -> Result<()> {
        Ok(())
    }
}
