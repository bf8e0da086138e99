// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runner talks to a `CommandExecutor` instead of spawning processes
//! itself. Production code uses [`ProcessExecutor`](super::ProcessExecutor);
//! tests can provide an implementation that records invocations and returns
//! scripted results without touching the OS.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::errors::Result;
use crate::types::BoxFuture;

use super::invocation::{CommandInvocation, CommandResult};

/// Bounds on a single run.
///
/// The default has no timeout and no cancellation: the run waits for the
/// child for as long as it takes. When either limit fires, the executor kills
/// the child and, on Unix, every process in its process group.
#[derive(Debug, Default)]
pub struct RunLimits {
    pub timeout: Option<Duration>,

    /// Firing this kills the child. A dropped sender means "never cancel".
    pub cancel: Option<oneshot::Receiver<()>>,
}

/// Trait abstracting how an invocation is executed.
pub trait CommandExecutor: Send + Sync {
    /// Run `invocation` to completion and capture both output streams.
    ///
    /// A non-zero exit is a successful `CommandResult`; only failing to run
    /// the process at all (spawn error, timeout, cancellation) is an `Err`.
    fn execute(
        &self,
        invocation: CommandInvocation,
        limits: RunLimits,
    ) -> BoxFuture<'_, Result<CommandResult>>;
}
