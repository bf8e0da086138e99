// src/exec/runner.rs

//! The shared "run external command" routine used by both plugin roles.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::oneshot;
use tracing::info;

use crate::config::ExecConfig;
use crate::errors::Result;
use crate::report::Reporter;

use super::backend::{CommandExecutor, RunLimits};
use super::invocation::{CommandInvocation, CommandResult};
use super::process::ProcessExecutor;

/// Runs configured external executables and reports on them.
///
/// Holds no per-run state; one runner can serve both roles.
#[derive(Clone)]
pub struct DelegateRunner {
    executor: Arc<dyn CommandExecutor>,
    reporter: Reporter,
}

impl DelegateRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>, reporter: Reporter) -> Self {
        Self { executor, reporter }
    }

    /// Runner spawning real processes and echoing to STDOUT.
    pub fn with_process_executor() -> Self {
        Self::new(Arc::new(ProcessExecutor), Reporter::stdout())
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Run the executable configured in `config` with the given labelled
    /// positional arguments.
    ///
    /// Fails with a configuration error, before anything is spawned, when no
    /// executable is configured. A non-zero exit is *not* an error here; the
    /// caller decides what it means.
    pub async fn run_external(
        &self,
        config: &ExecConfig,
        params: &[(&str, &str)],
    ) -> Result<CommandResult> {
        self.run_external_with_cancel(config, params, None).await
    }

    /// Like [`run_external`](Self::run_external), but the run is killed and
    /// reported as cancelled once `cancel` fires.
    pub async fn run_external_with_cancel(
        &self,
        config: &ExecConfig,
        params: &[(&str, &str)],
        cancel: Option<oneshot::Receiver<()>>,
    ) -> Result<CommandResult> {
        let exec = config.executable()?;
        let interpreter = config.interpreter();

        let invocation =
            CommandInvocation::new(interpreter, exec, params.iter().map(|(_, value)| *value));

        self.reporter.banner(interpreter, exec, params);

        let started = Instant::now();
        let limits = RunLimits {
            timeout: config.timeout,
            cancel,
        };
        let result = self.executor.execute(invocation, limits).await?;

        info!(
            role = %config.role,
            exec,
            exit_code = result.exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "external executable finished"
        );

        self.reporter.outcome(&result);

        Ok(result)
    }
}

impl std::fmt::Debug for DelegateRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateRunner")
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}
