//! Shared application state for the hostgate gateway.
//!
//! Built once at startup from config and handed to the router; handlers reach
//! the store through it instead of any process-wide handle.

use std::sync::Arc;

use hostgate_core::error::{HostgateError, Result};
use hostgate_core::repo::{HostRepository, JsonFileRepository, MemoryRepository};
use hostgate_core::HostPolicyStore;

use crate::config::{GatewayConfig, StorageBackend};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    store: HostPolicyStore,
}

impl AppState {
    /// Build application state, opening the configured storage backend.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let repo: Arc<dyn HostRepository> = match cfg.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryRepository::new()),
            StorageBackend::JsonFile => {
                let path = cfg.storage.path.as_deref().ok_or_else(|| {
                    HostgateError::Config(
                        "storage.path is required for the json_file backend".into(),
                    )
                })?;
                Arc::new(JsonFileRepository::open(path)?)
            }
        };

        tracing::info!(
            backend = ?cfg.storage.backend,
            path = ?cfg.storage.path,
            "host store ready"
        );
        Ok(Self::with_store(cfg, HostPolicyStore::new(repo)))
    }

    pub fn with_store(cfg: GatewayConfig, store: HostPolicyStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, store }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &HostPolicyStore {
        &self.inner.store
    }
}
