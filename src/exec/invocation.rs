// src/exec/invocation.rs

use std::borrow::Cow;
use std::fmt;

/// Argument vector for one external run.
///
/// Laid out as `[interpreter?, executable, args...]`; the interpreter is only
/// present when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub interpreter: Option<String>,
    pub executable: String,
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn new<I, S>(interpreter: Option<&str>, executable: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interpreter: interpreter.filter(|s| !s.is_empty()).map(str::to_string),
            executable: executable.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The program handed to the OS: the interpreter if set, else the
    /// executable itself.
    pub fn program(&self) -> &str {
        self.interpreter.as_deref().unwrap_or(&self.executable)
    }

    /// Full argument vector, `argv[0]` being [`program`](Self::program).
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if let Some(interp) = &self.interpreter {
            argv.push(interp.as_str());
        }
        argv.push(self.executable.as_str());
        argv.extend(self.args.iter().map(String::as_str));
        argv
    }

    /// Arguments following `argv[0]`.
    pub fn program_args(&self) -> Vec<&str> {
        let mut argv = self.argv();
        argv.remove(0);
        argv
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Exit status and captured output of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// `-1` when the child was terminated by a signal.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandResult {
    pub fn new(exit_code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}
