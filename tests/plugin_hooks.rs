// tests/plugin_hooks.rs

use std::sync::Arc;

use acme_external::challenge::ChallengeType;
use acme_external::plugin::{Authenticator, CertInstaller, ChallengeDelegate, Installer};
use acme_external_test_utils::builders::{ChallengeRequestBuilder, ExecConfigBuilder, runner_with};
use acme_external_test_utils::console::MemoryConsole;
use acme_external_test_utils::spy_executor::SpyExecutor;

fn installer(spy: &SpyExecutor, console: &MemoryConsole) -> Installer {
    Installer::new(
        ExecConfigBuilder::installer().exec("/opt/hooks/deploy").build(),
        runner_with(Arc::new(spy.clone()), console),
    )
}

#[test]
fn installer_lifecycle_hooks_are_inert() {
    let spy = SpyExecutor::exiting_with(1);
    let console = MemoryConsole::new();
    let installer = installer(&spy, &console);

    installer.prepare().unwrap();
    assert!(installer.get_all_names().is_empty());
    assert!(installer.get_all_certs_keys().is_empty());
    assert!(installer.supported_enhancements().is_empty());

    for enhancement in ["redirect", "ensure-http-header", "staple-ocsp", ""] {
        installer.enhance("example.com", enhancement, None).unwrap();
        installer.enhance("", enhancement, Some("Strict-Transport-Security")).unwrap();
    }

    installer.save(None, false).unwrap();
    installer.save(Some("before deploy"), true).unwrap();
    installer.rollback_checkpoints(0).unwrap();
    installer.rollback_checkpoints(usize::MAX).unwrap();
    installer.recovery_routine().unwrap();
    installer.view_config_changes().unwrap();
    installer.config_test().unwrap();
    installer.restart().unwrap();

    assert_eq!(spy.call_count(), 0);
    assert!(console.contents().is_empty());
}

#[test]
fn installer_hooks_ignore_missing_exec() {
    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();
    let installer = Installer::new(
        ExecConfigBuilder::installer().build(),
        runner_with(Arc::new(spy.clone()), &console),
    );

    installer.prepare().unwrap();
    installer.save(None, false).unwrap();
    installer.restart().unwrap();
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn authenticator_only_offers_http01() {
    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();
    let auth = Authenticator::new(
        ExecConfigBuilder::authenticator().exec("/opt/hooks/http01.sh").build(),
        80,
        runner_with(Arc::new(spy.clone()), &console),
    );

    auth.prepare().unwrap();
    assert_eq!(auth.get_chall_pref("example.com"), vec![ChallengeType::Http01]);
    assert_eq!(ChallengeType::Http01.as_str(), "http-01");

    let achalls = [ChallengeRequestBuilder::new("example.com").build()];
    auth.cleanup(&achalls).unwrap();
    assert_eq!(spy.call_count(), 0);
}

#[test]
fn plugins_describe_themselves() {
    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();

    let auth = Authenticator::new(
        ExecConfigBuilder::authenticator().build(),
        80,
        runner_with(Arc::new(spy.clone()), &console),
    );
    let info = auth.info();
    assert_eq!(info.description, "Configure web server(s) with given executable");
    assert!(info.more_info.contains("http-01"));

    let installer = installer(&spy, &console);
    assert_ne!(installer.info().name, info.name);
}
