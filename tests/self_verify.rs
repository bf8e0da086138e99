// tests/self_verify.rs

mod common;
use crate::common::{closed_port, init_tracing, serve_once, with_timeout};

use std::error::Error;
use std::sync::Arc;

use acme_external::challenge::{AccountKey, Http01Response};
use acme_external::errors::ExternalError;
use acme_external::exec::CommandResult;
use acme_external::plugin::{Authenticator, ChallengeDelegate};
use acme_external_test_utils::builders::{
    ChallengeRequestBuilder, ExecConfigBuilder, RFC7638_RSA_JWK, RFC7638_RSA_THUMBPRINT,
    TEST_JWK_THUMBPRINT, runner_with,
};
use acme_external_test_utils::console::MemoryConsole;
use acme_external_test_utils::spy_executor::SpyExecutor;

type TestResult = Result<(), Box<dyn Error>>;

const TOKEN: &str = "evaGxfADs6pSRb2LAv9IZf17Dt3juxGJ-PCt92wr-oA";

fn authenticator(spy: &SpyExecutor, port: u16, console: &MemoryConsole) -> Authenticator {
    Authenticator::new(
        ExecConfigBuilder::authenticator().exec("/opt/hooks/http01.sh").build(),
        port,
        runner_with(Arc::new(spy.clone()), console),
    )
}

#[test]
fn validation_is_token_dot_thumbprint() {
    let achall = ChallengeRequestBuilder::new("example.com").build();
    let (response, validation) = achall.response_and_validation();

    assert_eq!(validation, format!("{TOKEN}.{TEST_JWK_THUMBPRINT}"));
    assert_eq!(response.key_authorization, validation);
    assert_eq!(
        achall.uri(),
        format!("http://example.com/.well-known/acme-challenge/{TOKEN}")
    );
}

#[test]
fn key_authorization_must_match_token_and_key() {
    let achall = ChallengeRequestBuilder::new("example.com").build();
    let chall = &achall.challenge;
    let key = &achall.account_key;

    assert!(Http01Response::new(format!("{TOKEN}.{TEST_JWK_THUMBPRINT}")).verify_key_authorization(chall, key));
    assert!(!Http01Response::new(format!("other.{TEST_JWK_THUMBPRINT}")).verify_key_authorization(chall, key));
    assert!(!Http01Response::new(format!("{TOKEN}.wrong")).verify_key_authorization(chall, key));
    assert!(!Http01Response::new(TOKEN).verify_key_authorization(chall, key));
}

#[test]
fn validation_uses_the_given_account_key() -> TestResult {
    let achall = ChallengeRequestBuilder::new("example.com")
        .account_key(AccountKey::from_json(RFC7638_RSA_JWK)?)
        .build();
    let (response, validation) = achall.response_and_validation();

    assert_eq!(validation, format!("{TOKEN}.{RFC7638_RSA_THUMBPRINT}"));
    assert!(response.verify_key_authorization(&achall.challenge, &achall.account_key));
    Ok(())
}

#[tokio::test]
async fn failed_self_verify_still_returns_response() -> TestResult {
    init_tracing();

    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();
    let auth = authenticator(&spy, closed_port(), &console);

    let achalls = [ChallengeRequestBuilder::new("127.0.0.1").build()];
    let responses = with_timeout(auth.perform(&achalls)).await?;

    let (expected, _) = achalls[0].response_and_validation();
    assert_eq!(responses, vec![expected]);
    assert_eq!(spy.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn console_shows_where_content_must_be_served() -> TestResult {
    init_tracing();

    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();
    let auth = authenticator(&spy, closed_port(), &console);

    let achalls = [ChallengeRequestBuilder::new("127.0.0.1").build()];
    with_timeout(auth.perform(&achalls)).await?;

    let expected = format!(
        "Setting up external web server to display the following content at\n\
         http://127.0.0.1/.well-known/acme-challenge/{TOKEN}:\n\n{TOKEN}.{TEST_JWK_THUMBPRINT}\n\n"
    );
    assert!(console.contents().starts_with(&expected), "console: {}", console.contents());
    Ok(())
}

#[tokio::test]
async fn simple_verify_accepts_served_key_authorization() -> TestResult {
    init_tracing();

    let achall = ChallengeRequestBuilder::new("127.0.0.1").build();
    let (response, validation) = achall.response_and_validation();

    // Trailing whitespace is tolerated.
    let (port, server) = serve_once(format!("{validation}\r\n")).await?;

    let ok = with_timeout(response.simple_verify(
        &achall.challenge,
        &achall.domain,
        &achall.account_key,
        port,
    ))
    .await;
    assert!(ok);

    let request_line = server.await?;
    assert_eq!(
        request_line,
        format!("GET /.well-known/acme-challenge/{TOKEN} HTTP/1.1")
    );
    Ok(())
}

#[tokio::test]
async fn simple_verify_rejects_wrong_content() -> TestResult {
    init_tracing();

    let achall = ChallengeRequestBuilder::new("127.0.0.1").build();
    let (response, _) = achall.response_and_validation();

    let (port, server) = serve_once("not the key authorization".to_string()).await?;

    let ok = with_timeout(response.simple_verify(
        &achall.challenge,
        &achall.domain,
        &achall.account_key,
        port,
    ))
    .await;
    assert!(!ok);
    server.await?;
    Ok(())
}

#[tokio::test]
async fn perform_answers_challenges_in_order() -> TestResult {
    init_tracing();

    let spy = SpyExecutor::exiting_with(0);
    let console = MemoryConsole::new();
    let auth = authenticator(&spy, closed_port(), &console);

    let achalls = [
        ChallengeRequestBuilder::new("127.0.0.1").token("first").build(),
        ChallengeRequestBuilder::new("127.0.0.1").token("second").build(),
    ];
    let responses = with_timeout(auth.perform(&achalls)).await?;
    assert_eq!(responses.len(), 2);
    assert!(responses[0].key_authorization.starts_with("first."));
    assert!(responses[1].key_authorization.starts_with("second."));

    let uris: Vec<String> = spy.invocations().iter().map(|i| i.args[0].clone()).collect();
    assert_eq!(
        uris,
        vec![
            "/.well-known/acme-challenge/first",
            "/.well-known/acme-challenge/second",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn perform_stops_at_first_failed_setup() -> TestResult {
    init_tracing();

    // First run succeeds, every later one exits 1.
    let spy = SpyExecutor::exiting_with(1);
    spy.push_result(CommandResult::new(0, "", ""));
    let console = MemoryConsole::new();
    let auth = authenticator(&spy, closed_port(), &console);

    let achalls = [
        ChallengeRequestBuilder::new("127.0.0.1").token("first").build(),
        ChallengeRequestBuilder::new("127.0.0.1").token("second").build(),
        ChallengeRequestBuilder::new("127.0.0.1").token("third").build(),
    ];
    let err = with_timeout(auth.perform(&achalls))
        .await
        .expect_err("second setup exits 1");

    match err {
        ExternalError::Execution { exec } => assert_eq!(exec, "/opt/hooks/http01.sh"),
        other => panic!("expected Execution, got {other:?}"),
    }
    assert_eq!(spy.call_count(), 2);
    Ok(())
}
