// src/exec/process.rs

//! Real process executor.

use std::future::pending;
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::errors::{ExternalError, Result};
use crate::types::BoxFuture;

use super::backend::{CommandExecutor, RunLimits};
use super::invocation::{CommandInvocation, CommandResult};

/// Executor backed by `tokio::process::Command`.
///
/// The child gets a null stdin and piped stdout/stderr, both read to the end
/// before the result is returned.
///
/// On Unix the child leads its own process group. A timeout or cancellation
/// kills the whole group, so anything the executable started in the
/// background goes down with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(
        &self,
        invocation: CommandInvocation,
        limits: RunLimits,
    ) -> BoxFuture<'_, Result<CommandResult>> {
        Box::pin(run_process(invocation, limits))
    }
}

async fn run_process(invocation: CommandInvocation, limits: RunLimits) -> Result<CommandResult> {
    let mut cmd = Command::new(invocation.program());
    cmd.args(invocation.program_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    let child = cmd.spawn().map_err(|source| ExternalError::Spawn {
        exec: invocation.executable.clone(),
        source,
    })?;

    let pid = child.id();
    debug!(pid, argv = %invocation, "spawned external executable");

    let RunLimits { timeout, cancel } = limits;

    let deadline = async move {
        match timeout {
            Some(after) => tokio::time::sleep(after).await,
            None => pending::<()>().await,
        }
    };

    // Dropping `wait_with_output` drops the child, which kills it
    // (`kill_on_drop`). The early exits also kill its process group.
    tokio::select! {
        output = child.wait_with_output() => {
            let output = output?;
            let exit_code = output.status.code().unwrap_or(-1);
            Ok(CommandResult::new(exit_code, output.stdout, output.stderr))
        }

        _ = deadline => {
            let after = timeout.unwrap_or_default();
            warn!(exec = %invocation.executable, ?after, "external executable timed out; killing it");
            kill_process_group(pid);
            Err(ExternalError::TimedOut {
                exec: invocation.executable,
                after,
            })
        }

        _ = cancelled(cancel) => {
            warn!(exec = %invocation.executable, "external executable cancelled; killing it");
            kill_process_group(pid);
            Err(ExternalError::Cancelled {
                exec: invocation.executable,
            })
        }
    }
}

/// Resolves only on an explicit cancellation.
async fn cancelled(cancel: Option<oneshot::Receiver<()>>) {
    match cancel {
        Some(rx) => {
            if rx.await.is_err() {
                debug!("cancel channel closed without explicit cancellation");
                pending::<()>().await;
            }
        }
        None => pending::<()>().await,
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    if let Err(err) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        debug!(pid, error = %err, "killing process group failed");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}
