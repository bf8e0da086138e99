// tests/cert_install.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, path_str, with_timeout, write_script};

use std::error::Error;
use std::sync::Arc;

use tempfile::TempDir;

use acme_external::errors::ExternalError;
use acme_external::exec::{DelegateRunner, ProcessExecutor};
use acme_external::plugin::{CertInstaller, Installer};
use acme_external_test_utils::builders::{ExecConfigBuilder, install_request};
use acme_external_test_utils::console::MemoryConsole;

type TestResult = Result<(), Box<dyn Error>>;

fn installer(exec: &str, interpreter: Option<&str>, console: &MemoryConsole) -> Installer {
    let mut builder = ExecConfigBuilder::installer().exec(exec);
    if let Some(interp) = interpreter {
        builder = builder.interpreter(interp);
    }
    Installer::new(
        builder.build(),
        DelegateRunner::new(Arc::new(ProcessExecutor), console.reporter()),
    )
}

#[tokio::test]
async fn arguments_arrive_in_fixed_order() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let script = write_script(&dir, "echo-args.sh", "for a in \"$@\"; do echo \"arg=$a\"; done");

    let console = MemoryConsole::new();
    let installer = installer(path_str(&script), Some("/bin/sh"), &console);

    with_timeout(installer.deploy_cert(&install_request())).await?;

    let echoed: Vec<String> = console
        .lines()
        .into_iter()
        .filter_map(|l| l.strip_prefix("arg=").map(str::to_string))
        .collect();
    assert_eq!(
        echoed,
        vec![
            "example.com",
            "/tmp/cert.pem",
            "/tmp/key.pem",
            "/tmp/chain.pem",
            "/tmp/fullchain.pem",
        ]
    );
    assert!(console.contents().contains("certificate for example.com installed"));
    Ok(())
}

#[tokio::test]
async fn interpreter_runs_the_script() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let script = write_script(&dir, "count.sh", "echo \"argc=$#\"");

    let console = MemoryConsole::new();
    let installer = installer(path_str(&script), Some("/bin/sh"), &console);

    with_timeout(installer.run_cert_install(&install_request())).await?;

    let out = console.contents();
    assert!(out.contains("interpreter: /bin/sh"));
    assert!(out.contains("argc=5"));
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_is_an_install_error() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let script = write_script(&dir, "broken.sh", "echo 'reload failed' >&2\nexit 3");
    let exec = path_str(&script).to_string();

    let console = MemoryConsole::new();
    let installer = installer(&exec, Some("/bin/sh"), &console);

    match with_timeout(installer.deploy_cert(&install_request())).await {
        Err(ExternalError::Install { exec: named }) => assert_eq!(named, exec),
        other => panic!("Expected Install error, got: {other:?}"),
    }

    let out = console.contents();
    assert!(out.contains("exit code: 3"));
    assert!(out.contains("reload failed"));
    assert!(!out.contains("installed"));
    Ok(())
}
