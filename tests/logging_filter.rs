// tests/logging_filter.rs

use acme_external::cli::LogLevel;
use acme_external::logging::{DEFAULT_DIRECTIVES, filter_directives};

#[test]
fn cli_level_wins_over_environment() {
    assert_eq!(filter_directives(Some(LogLevel::Debug), Some("error")), "debug");
    assert_eq!(filter_directives(Some(LogLevel::Trace), None), "trace");
}

#[test]
fn info_level_quiets_the_http_client() {
    let directives = filter_directives(Some(LogLevel::Info), None);
    assert_eq!(directives, DEFAULT_DIRECTIVES);
    assert!(directives.starts_with("info,"));
    for target in ["reqwest=warn", "hyper=warn", "hyper_util=warn"] {
        assert!(directives.split(',').any(|d| d == target), "missing {target}");
    }
}

#[test]
fn environment_directives_are_used_verbatim() {
    assert_eq!(
        filter_directives(None, Some(" acme_external=debug,reqwest=info ")),
        "acme_external=debug,reqwest=info"
    );
}

#[test]
fn empty_or_invalid_environment_falls_back_to_default() {
    assert_eq!(filter_directives(None, None), DEFAULT_DIRECTIVES);
    assert_eq!(filter_directives(None, Some("   ")), DEFAULT_DIRECTIVES);
    assert_eq!(filter_directives(None, Some("acme_external=loud")), DEFAULT_DIRECTIVES);
}
