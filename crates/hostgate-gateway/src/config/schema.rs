use std::net::SocketAddr;

use serde::Deserialize;
use hostgate_core::error::{HostgateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            storage: StorageSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HostgateError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.storage.validate()?;

        Ok(())
    }

    /// `HOSTGATE_LISTEN` replaces the listen address; `HOSTGATE_DB` selects the
    /// JSON file backend at that path.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(listen) = lookup("HOSTGATE_LISTEN") {
            self.gateway.listen = listen;
        }
        if let Some(db) = lookup("HOSTGATE_DB") {
            self.storage.backend = StorageBackend::JsonFile;
            self.storage.path = Some(db);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            HostgateError::Config(format!(
                "gateway.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    JsonFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub path: Option<String>,
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::JsonFile
            && self.path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            return Err(HostgateError::Config(
                "storage.path is required for the json_file backend".into(),
            ));
        }
        Ok(())
    }
}
