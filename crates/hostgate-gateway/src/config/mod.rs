//! Gateway config loader (strict parsing).
//!
//! Sources, later wins: YAML file, then `HOSTGATE_LISTEN` / `HOSTGATE_DB`
//! environment overrides. Validation runs once everything is applied.

pub mod schema;

use std::fs;
use std::path::Path;

use hostgate_core::error::{HostgateError, Result};

pub use schema::{GatewayConfig, GatewaySection, StorageBackend, StorageSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "HOSTGATE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "hostgate.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HostgateError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load config the way the binary does.
///
/// An explicitly named file (`HOSTGATE_CONFIG`) must exist. Without one,
/// `hostgate.yaml` is used when present, otherwise built-in defaults.
pub fn load_from_env() -> Result<GatewayConfig> {
    load_with(|key| std::env::var(key).ok())
}

pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<GatewayConfig> {
    let mut cfg = match lookup(CONFIG_ENV) {
        Some(path) => parse(&read(&path)?)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => parse(&read(DEFAULT_CONFIG_PATH)?)?,
        None => GatewayConfig::default(),
    };
    cfg.apply_overrides(&lookup);
    cfg.validate()?;
    Ok(cfg)
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| HostgateError::Config(format!("read config {path} failed: {e}")))
}

fn parse(s: &str) -> Result<GatewayConfig> {
    serde_yaml::from_str(s).map_err(|e| HostgateError::Config(format!("invalid yaml: {e}")))
}
