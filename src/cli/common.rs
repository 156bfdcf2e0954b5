//! Shared setup for command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use folio::{ClientStorage, Config, DataGateway, LocaleStore, OfflineTransport};

/// Loaded configuration plus the session's storage and gateway.
pub(crate) struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub storage: Arc<ClientStorage>,
    pub gateway: Arc<DataGateway>,
}

impl AppContext {
    pub(crate) fn load(config_path: Option<&Path>, offline: bool) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::path);
        let config = Config::load_from_path(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let storage = Arc::new(ClientStorage::open(config.storage.resolved_path()));
        let gateway = if offline {
            DataGateway::new(
                Arc::new(OfflineTransport),
                Arc::clone(&storage),
                config.fixtures.clone(),
            )
        } else {
            DataGateway::from_config(&config, Arc::clone(&storage))
                .context("Failed to build API transport")?
        };

        Ok(Self {
            config,
            config_path,
            storage,
            gateway: Arc::new(gateway),
        })
    }

    pub(crate) fn locale_store(&self) -> LocaleStore {
        LocaleStore::new(Arc::clone(&self.storage))
    }
}
