// src/config/mod.rs

//! Configuration loading and validation for acme-external.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and layer CLI overrides (`loader.rs`).
//! - Validate option values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{apply_overrides, load_and_validate, load_from_path, resolve};
pub use model::{
    ConfigFile, DEFAULT_HTTP01_PORT, ExecConfig, ExecSection, RawConfigFile, VerifySection,
};
pub use validate::validate_config;
