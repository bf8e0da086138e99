#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use acme_external::challenge::{AccountKey, ChallengeRequest, Http01Challenge};
use acme_external::config::ExecConfig;
use acme_external::exec::{CommandExecutor, DelegateRunner};
use acme_external::plugin::InstallRequest;
use acme_external::types::Role;

use crate::console::MemoryConsole;

/// EC P-256 public key from RFC 7517 appendix A.1.
pub const TEST_JWK: &str = r#"{
    "kty": "EC",
    "crv": "P-256",
    "x": "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU",
    "y": "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0",
    "use": "enc",
    "kid": "1"
}"#;

/// RFC 7638 thumbprint of [`TEST_JWK`].
pub const TEST_JWK_THUMBPRINT: &str = "oKIywvGUpTVTyxMQ3bwIIeQUudfr_CkLMjCE19ECD-U";

/// RSA example key from RFC 7638 section 3.1.
pub const RFC7638_RSA_JWK: &str = r#"{
    "kty": "RSA",
    "n": "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw",
    "e": "AQAB",
    "alg": "RS256",
    "kid": "2011-04-29"
}"#;

/// RFC 7638 thumbprint of [`RFC7638_RSA_JWK`].
pub const RFC7638_RSA_THUMBPRINT: &str = "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs";

pub fn test_account_key() -> AccountKey {
    AccountKey::from_json(TEST_JWK).expect("test JWK is valid")
}

/// Builder for `ExecConfig`.
pub struct ExecConfigBuilder {
    config: ExecConfig,
}

impl ExecConfigBuilder {
    pub fn new(role: Role) -> Self {
        Self {
            config: ExecConfig::new(role),
        }
    }

    pub fn authenticator() -> Self {
        Self::new(Role::Authenticator)
    }

    pub fn installer() -> Self {
        Self::new(Role::Installer)
    }

    pub fn exec(mut self, path: &str) -> Self {
        self.config.exec = Some(path.to_string());
        self
    }

    pub fn interpreter(mut self, path: &str) -> Self {
        self.config.exec_interpreter = Some(path.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ExecConfig {
        self.config
    }
}

/// Builder for `ChallengeRequest`, using [`TEST_JWK`] as account key.
pub struct ChallengeRequestBuilder {
    domain: String,
    token: String,
    account_key: AccountKey,
}

impl ChallengeRequestBuilder {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            token: "evaGxfADs6pSRb2LAv9IZf17Dt3juxGJ-PCt92wr-oA".to_string(),
            account_key: test_account_key(),
        }
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn account_key(mut self, key: AccountKey) -> Self {
        self.account_key = key;
        self
    }

    pub fn build(self) -> ChallengeRequest {
        let challenge = Http01Challenge::new(self.token).expect("test token is valid");
        ChallengeRequest::new(self.domain, challenge, self.account_key)
    }
}

/// `example.com` request with `/tmp/*.pem` paths.
pub fn install_request() -> InstallRequest {
    InstallRequest {
        domain: "example.com".to_string(),
        cert_path: "/tmp/cert.pem".to_string(),
        key_path: "/tmp/key.pem".to_string(),
        chain_path: "/tmp/chain.pem".to_string(),
        fullchain_path: "/tmp/fullchain.pem".to_string(),
    }
}

/// Runner wired to `executor`, echoing into `console`.
pub fn runner_with(executor: Arc<dyn CommandExecutor>, console: &MemoryConsole) -> DelegateRunner {
    DelegateRunner::new(executor, console.reporter())
}
