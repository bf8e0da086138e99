// src/logging.rs

//! Logging setup for `acme-external` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen, in order, from:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `ACME_EXTERNAL_LOG` environment variable, as `EnvFilter` directives
//!    (e.g. "debug" or "acme_external=debug,reqwest=info")
//! 3. [`DEFAULT_DIRECTIVES`]
//!
//! At `info` and above the HTTP client used for self-verification is held at
//! `warn`, so its connection chatter does not interleave with the banners.
//!
//! Logs are sent to STDERR; STDOUT is the operator console that echoes
//! banners and child output.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "ACME_EXTERNAL_LOG";

/// Targets of the self-verification HTTP stack.
const HTTP_CLIENT_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util"];

/// Filter used when neither the CLI nor the environment says otherwise.
pub const DEFAULT_DIRECTIVES: &str = "info,reqwest=warn,hyper=warn,hyper_util=warn";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(cli_level, env.as_deref());

    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising tracing subscriber: {e}"))?;

    Ok(())
}

/// Resolve the filter directives for a CLI level and `ACME_EXTERNAL_LOG`.
///
/// Environment directives that do not parse are ignored in favour of
/// [`DEFAULT_DIRECTIVES`].
pub fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directives(lvl);
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) if EnvFilter::try_new(directives).is_ok() => directives.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_directives(lvl: LogLevel) -> String {
    let base = match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    match lvl {
        LogLevel::Info => {
            let mut directives = base.to_string();
            for target in HTTP_CLIENT_TARGETS {
                directives.push_str(&format!(",{target}=warn"));
            }
            directives
        }
        _ => base.to_string(),
    }
}
