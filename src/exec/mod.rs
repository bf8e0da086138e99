// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] holds the argument vector and result types.
//! - [`backend`] provides the `CommandExecutor` trait that the runner talks
//!   to, so tests can swap in an executor that never spawns anything.
//! - [`process`] is the production executor on top of
//!   `tokio::process::Command`.
//! - [`runner`] is the routine both plugin roles share: check the config,
//!   build the argv, report, run, report again.

pub mod backend;
pub mod invocation;
pub mod process;
pub mod runner;

pub use backend::{CommandExecutor, RunLimits};
pub use invocation::{CommandInvocation, CommandResult};
pub use process::ProcessExecutor;
pub use runner::DelegateRunner;
