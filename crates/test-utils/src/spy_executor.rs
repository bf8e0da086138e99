use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use acme_external::errors::Result;
use acme_external::exec::{CommandExecutor, CommandInvocation, CommandResult, RunLimits};
use acme_external::types::BoxFuture;

/// An executor that never spawns anything. It:
/// - records every invocation it is asked to run
/// - answers with scripted results, in order, falling back to a default
#[derive(Clone)]
pub struct SpyExecutor {
    invocations: Arc<Mutex<Vec<CommandInvocation>>>,
    scripted: Arc<Mutex<VecDeque<CommandResult>>>,
    fallback: CommandResult,
}

impl SpyExecutor {
    /// Every run exits with `code` and empty output.
    pub fn exiting_with(code: i32) -> Self {
        Self::with_output(code, "", "")
    }

    /// Every run exits with `code` and the given output.
    pub fn with_output(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            fallback: CommandResult::new(code, stdout, stderr),
        }
    }

    /// Queue a result for the next run; queued results win over the fallback.
    pub fn push_result(&self, result: CommandResult) {
        self.scripted.lock().unwrap().push_back(result);
    }

    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

impl CommandExecutor for SpyExecutor {
    fn execute(
        &self,
        invocation: CommandInvocation,
        _limits: RunLimits,
    ) -> BoxFuture<'_, Result<CommandResult>> {
        self.invocations.lock().unwrap().push(invocation);
        let result = self
            .scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        Box::pin(async move { Ok(result) })
    }
}
