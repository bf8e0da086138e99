// src/challenge/jwk.rs

//! Account public key as a JSON Web Key, and its RFC 7638 thumbprint.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::prelude::*;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::{ExternalError, Result};

/// Public part of the ACME account key.
///
/// Only the members that take part in the thumbprint are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountKey {
    // BTreeMap keeps the members in lexical order, which the thumbprint
    // input requires.
    required: BTreeMap<String, String>,
}

impl AccountKey {
    /// Parse a JWK from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Read a JWK from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("JWK must be a JSON object"))?;

        let kty = obj
            .get("kty")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("JWK is missing \"kty\""))?;

        let members: &[&str] = match kty {
            "EC" => &["crv", "kty", "x", "y"],
            "RSA" => &["e", "kty", "n"],
            "OKP" => &["crv", "kty", "x"],
            other => return Err(invalid(&format!("unsupported JWK key type \"{other}\""))),
        };

        let mut required = BTreeMap::new();
        for member in members {
            let value = obj
                .get(*member)
                .and_then(Value::as_str)
                .ok_or_else(|| invalid(&format!("{kty} JWK is missing \"{member}\"")))?;
            required.insert((*member).to_string(), value.to_string());
        }

        Ok(Self { required })
    }

    pub fn key_type(&self) -> &str {
        self.required.get("kty").map(String::as_str).unwrap_or_default()
    }

    /// base64url(SHA-256(canonical JWK)), without padding.
    pub fn thumbprint(&self) -> String {
        // Serializing a map of strings cannot fail.
        let canonical = serde_json::to_string(&self.required).unwrap_or_default();
        BASE64_URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
    }
}

fn invalid(msg: &str) -> ExternalError {
    ExternalError::Configuration(format!("invalid account key: {msg}"))
}
