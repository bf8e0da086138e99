// src/lib.rs

//! Delegate ACME http-01 challenge setup and certificate installation to
//! external executables.
//!
//! The crate implements two host-facing roles:
//!
//! - [`plugin::Authenticator`] runs `<exec> <uri-path> <validation>` for each
//!   pending http-01 challenge and self-verifies the published content.
//! - [`plugin::Installer`] runs
//!   `<exec> <domain> <cert> <key> <chain> <fullchain>` for each issued
//!   certificate.
//!
//! Either command can be prefixed with a configured interpreter. Exit code 0
//! means success; anything else is a failure.

pub mod challenge;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plugin;
pub mod report;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::challenge::{AccountKey, ChallengeRequest, Http01Challenge};
use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, ExecConfig};
use crate::exec::DelegateRunner;
use crate::plugin::{
    Authenticator, CertInstaller, ChallengeDelegate, InstallRequest, Installer, PluginInfo,
};
use crate::report::{ConsoleSink, WriterConsole};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the shared runner (real process executor, STDOUT console)
/// - the role selected by the subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::resolve(args.config.as_deref(), &args.overrides)?;

    let console = WriterConsole::stdout();

    if args.dry_run {
        print_dry_run(&console, &cfg);
        return Ok(());
    }

    let runner = DelegateRunner::with_process_executor();

    match args.command {
        Command::Perform {
            domain,
            token,
            account_jwk,
        } => {
            let account_key = AccountKey::from_path(&account_jwk)?;
            let achall = ChallengeRequest::new(domain, Http01Challenge::new(token)?, account_key);

            let authenticator = Authenticator::from_config(&cfg, runner);
            authenticator.prepare()?;

            let achalls = [achall];
            let result = authenticator.perform(&achalls).await;
            authenticator.cleanup(&achalls)?;

            for response in result? {
                info!(key_authorization = %response.key_authorization, "challenge set up");
            }
        }

        Command::Deploy {
            domain,
            cert,
            key,
            chain,
            fullchain,
        } => {
            let request = InstallRequest {
                domain,
                cert_path: cert,
                key_path: key,
                chain_path: chain,
                fullchain_path: fullchain,
            };

            let installer = Installer::from_config(&cfg, runner);
            installer.prepare()?;
            installer.deploy_cert(&request).await?;
        }

        Command::Info => {
            let authenticator = Authenticator::from_config(&cfg, runner.clone());
            let installer = Installer::from_config(&cfg, runner);

            print_plugin_info(&console, &authenticator.info());
            let prefs: Vec<&str> = authenticator
                .get_chall_pref("")
                .into_iter()
                .map(|c| c.as_str())
                .collect();
            console.write_line(&format!("  challenges: {}", prefs.join(", ")));
            console.write_line("");
            print_plugin_info(&console, &installer.info());
        }
    }

    Ok(())
}

fn print_plugin_info(console: &dyn ConsoleSink, info: &PluginInfo) {
    console.write_line(info.name);
    console.write_line(&format!("  {}", info.description));
    console.write_line(&format!("  {}", info.more_info));
}

/// Dry-run output: print the resolved options of both roles.
fn print_dry_run(console: &dyn ConsoleSink, cfg: &ConfigFile) {
    console.write_line("acme-external dry-run");
    print_exec_config(console, &cfg.authenticator);
    print_exec_config(console, &cfg.installer);
    console.write_line(&format!("verify.http01-port = {}", cfg.http01_port));

    debug!("dry-run complete (no execution)");
}

fn print_exec_config(console: &dyn ConsoleSink, exec: &ExecConfig) {
    console.write_line(&format!("[{}]", exec.role));
    match exec.executable() {
        Ok(path) => console.write_line(&format!("  exec: {path}")),
        Err(_) => console.write_line(&format!("  exec: (not set, {})", exec.role.exec_flag())),
    }
    if let Some(interp) = exec.interpreter() {
        console.write_line(&format!("  exec-interpreter: {interp}"));
    }
    match exec.timeout {
        Some(t) => console.write_line(&format!("  timeout: {}s", t.as_secs())),
        None => console.write_line("  timeout: none"),
    }
}
