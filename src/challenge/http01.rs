// src/challenge/http01.rs

//! http-01 challenge and response.

use std::time::Duration;

use tracing::debug;

use crate::errors::{ExternalError, Result};

use super::jwk::AccountKey;

/// Directory under which the ACME server looks for http-01 tokens.
pub const WELL_KNOWN_PATH: &str = "/.well-known/acme-challenge";

/// Characters stripped from the end of a served key authorization.
const WHITESPACE_CUTSET: &[char] = &['\n', '\r', '\t', ' '];

const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported ACME challenge types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeType {
    Http01,
}

impl ChallengeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeType::Http01 => "http-01",
        }
    }
}

/// An http-01 challenge as offered by the ACME server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Http01Challenge {
    token: String,
}

impl Http01Challenge {
    /// The token must be non-empty base64url without padding.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let valid = !token.is_empty()
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(ExternalError::Configuration(format!(
                "invalid http-01 token {token:?}: expected non-empty base64url"
            )));
        }
        Ok(Self { token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Path the validation content must be served at.
    pub fn path(&self) -> String {
        format!("{WELL_KNOWN_PATH}/{}", self.token)
    }

    /// URL the ACME server fetches for `domain`.
    pub fn uri(&self, domain: &str) -> String {
        format!("http://{domain}{}", self.path())
    }

    /// URL used for self-verification; the port is left out when it is 80.
    pub fn verification_uri(&self, domain: &str, port: u16) -> String {
        if port == 80 {
            self.uri(domain)
        } else {
            format!("http://{domain}:{port}{}", self.path())
        }
    }

    /// `<token>.<account key thumbprint>`.
    pub fn key_authorization(&self, account_key: &AccountKey) -> String {
        format!("{}.{}", self.token, account_key.thumbprint())
    }
}

/// Response to an http-01 challenge, handed back to the host untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Http01Response {
    pub key_authorization: String,
}

impl Http01Response {
    pub fn new(key_authorization: impl Into<String>) -> Self {
        Self {
            key_authorization: key_authorization.into(),
        }
    }

    /// Whether the key authorization belongs to `chall` and `account_key`.
    pub fn verify_key_authorization(
        &self,
        chall: &Http01Challenge,
        account_key: &AccountKey,
    ) -> bool {
        let Some((token, thumbprint)) = self.key_authorization.split_once('.') else {
            debug!(key_authorization = %self.key_authorization, "key authorization has no '.'");
            return false;
        };

        if token != chall.token() {
            debug!(expected = chall.token(), found = token, "key authorization token mismatch");
            return false;
        }

        let expected = account_key.thumbprint();
        if thumbprint != expected {
            debug!(%expected, found = thumbprint, "key authorization thumbprint mismatch");
            return false;
        }

        true
    }

    /// Check locally that the challenge is answered correctly.
    ///
    /// Fetches the challenge path from `domain:port` and compares the body,
    /// minus trailing whitespace, to the key authorization. Never fails:
    /// any problem (including network errors) yields `false`.
    pub async fn simple_verify(
        &self,
        chall: &Http01Challenge,
        domain: &str,
        account_key: &AccountKey,
        port: u16,
    ) -> bool {
        if !self.verify_key_authorization(chall, account_key) {
            debug!("verification of key authorization in response failed");
            return false;
        }

        let uri = chall.verification_uri(domain, port);
        debug!(%uri, "verifying http-01 challenge");

        let body = match fetch(&uri).await {
            Ok(body) => body,
            Err(err) => {
                debug!(%uri, error = %err, "unable to reach challenge uri");
                return false;
            }
        };

        let served = body.trim_end_matches(WHITESPACE_CUTSET);
        if served != self.key_authorization {
            debug!(
                expected = %self.key_authorization,
                found = %served,
                "served key authorization does not match"
            );
            return false;
        }

        true
    }
}

async fn fetch(uri: &str) -> reqwest::Result<String> {
    // Go straight to the domain, the way the ACME server will.
    let client = reqwest::Client::builder()
        .timeout(VERIFY_TIMEOUT)
        .no_proxy()
        .build()?;
    client.get(uri).send().await?.text().await
}
