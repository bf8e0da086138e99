// src/challenge/mod.rs

//! ACME challenge types the authenticator works with.
//!
//! Only http-01 is supported. A [`ChallengeRequest`] is what the host hands
//! over per pending authorization; the authenticator turns it into an
//! [`Http01Response`] and the validation string the external server has to
//! publish.

pub mod http01;
pub mod jwk;

pub use http01::{ChallengeType, Http01Challenge, Http01Response, WELL_KNOWN_PATH};
pub use jwk::AccountKey;

/// A pending http-01 challenge for one domain.
#[derive(Debug, Clone)]
pub struct ChallengeRequest {
    pub domain: String,
    pub challenge: Http01Challenge,
    pub account_key: AccountKey,
}

impl ChallengeRequest {
    pub fn new(domain: impl Into<String>, challenge: Http01Challenge, account_key: AccountKey) -> Self {
        Self {
            domain: domain.into(),
            challenge,
            account_key,
        }
    }

    /// The response for the ACME server and the content to publish.
    ///
    /// For http-01 both carry the key authorization.
    pub fn response_and_validation(&self) -> (Http01Response, String) {
        let key_authorization = self.challenge.key_authorization(&self.account_key);
        (Http01Response::new(key_authorization.clone()), key_authorization)
    }

    pub fn uri(&self) -> String {
        self.challenge.uri(&self.domain)
    }
}
