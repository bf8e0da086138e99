// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The binary plays the part of the host: it resolves configuration, builds
//! the challenge / install requests and drives the authenticator or installer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `acme-external`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "acme-external",
    version,
    about = "Delegate ACME http-01 challenges and certificate installation to external executables.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `acme-external.toml` in the current working directory is
    /// used when it exists.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ACME_EXTERNAL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but don't run any executable.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Per-option overrides that win over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// External executable path for http-01 challenge setup.
    #[arg(long = "external-auth-exec", value_name = "PATH", global = true)]
    pub auth_exec: Option<String>,

    /// Interpreter used to run the challenge executable.
    #[arg(long = "external-auth-exec-interpreter", value_name = "PATH", global = true)]
    pub auth_exec_interpreter: Option<String>,

    /// External executable path for certificate installation.
    #[arg(long = "external-install-exec", value_name = "PATH", global = true)]
    pub install_exec: Option<String>,

    /// Interpreter used to run the install executable.
    #[arg(long = "external-install-exec-interpreter", value_name = "PATH", global = true)]
    pub install_exec_interpreter: Option<String>,

    /// Port used when self-verifying an http-01 challenge.
    #[arg(long = "http01-port", value_name = "PORT", global = true)]
    pub http01_port: Option<u16>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Set up an http-01 challenge through the external executable.
    Perform {
        /// Domain being validated.
        #[arg(long)]
        domain: String,

        /// Challenge token issued by the ACME server.
        #[arg(long)]
        token: String,

        /// Account public key as a JSON Web Key file.
        #[arg(long, value_name = "FILE")]
        account_jwk: PathBuf,
    },

    /// Install an issued certificate through the external executable.
    Deploy {
        #[arg(long)]
        domain: String,

        #[arg(long, value_name = "PATH")]
        cert: String,

        #[arg(long, value_name = "PATH")]
        key: String,

        #[arg(long, value_name = "PATH")]
        chain: String,

        #[arg(long, value_name = "PATH")]
        fullchain: String,
    },

    /// Describe both plugins.
    Info,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
