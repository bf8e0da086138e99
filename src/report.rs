// src/report.rs

//! Operator-facing output.
//!
//! Every progress line goes to two sinks: the structured `tracing` log and a
//! [`ConsoleSink`] the operator reads. Both are fed from the same formatting
//! routines below so the two never drift apart.

use std::io::{Stdout, Write};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::exec::CommandResult;

const RULE: &str = "===============================";

/// User-visible console.
pub trait ConsoleSink: Send + Sync {
    /// Write `line` followed by a newline.
    fn write_line(&self, line: &str);

    /// Write `text` verbatim.
    fn write_raw(&self, text: &str);
}

/// Console writing to any `Write` handle, STDOUT in production.
///
/// Write errors (e.g. a closed pipe when the output is piped into `head`)
/// never panic: they are logged at debug level and the text is dropped.
#[derive(Debug)]
pub struct WriterConsole<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterConsole<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn emit(&self, text: &str) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(err) = writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
        {
            debug!(error = %err, "console write failed");
        }
    }
}

impl WriterConsole<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink for WriterConsole<W> {
    fn write_line(&self, line: &str) {
        self.emit(&format!("{line}\n"));
    }

    fn write_raw(&self, text: &str) {
        self.emit(text);
    }
}

/// Fans progress lines out to the log and the console.
#[derive(Clone)]
pub struct Reporter {
    console: Arc<dyn ConsoleSink>,
}

impl Reporter {
    pub fn new(console: Arc<dyn ConsoleSink>) -> Self {
        Self { console }
    }

    /// Reporter echoing to STDOUT.
    pub fn stdout() -> Self {
        Self::new(Arc::new(WriterConsole::stdout()))
    }

    /// Log `msg` at info level and echo it to the console.
    pub fn info(&self, msg: &str) {
        info!("{msg}");
        self.console.write_line(msg);
    }

    /// Write to the console only.
    pub fn console(&self, text: &str) {
        self.console.write_raw(text);
    }

    /// Banner printed before an external executable runs.
    ///
    /// `params` are the positional arguments with a short label each, in the
    /// order they are passed to the executable.
    pub fn banner(&self, interpreter: Option<&str>, exec: &str, params: &[(&str, &str)]) {
        self.info("");
        self.info(RULE);
        if let Some(interp) = interpreter {
            self.info(&field("interpreter", interp));
        }
        self.info(&field("executable", exec));
        for (label, value) in params {
            self.info(&field(label, value));
        }
        self.info(RULE);
        self.info("");
        self.info("running ...");
    }

    /// Exit code and captured streams of a finished run.
    pub fn outcome(&self, result: &CommandResult) {
        self.info(&format!("exit code: {}", result.exit_code));
        self.info("[stdout]");
        self.info(&result.stdout_lossy());
        self.info("[stderr]");
        self.info(&result.stderr_lossy());
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{:<12} {}", format!("{label}:"), value)
}
