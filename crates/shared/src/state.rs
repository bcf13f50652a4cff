use anyhow::{Context, Result, anyhow};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    abstract_trait::{DynClock, DynTransferRepository},
    config::{Config, ConnectionManager, StoreBackend, SystemClock},
    repository::{SheetTransferRepository, TransferRepository},
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Connects the transfer store once; callers treat an error as fatal.
    pub async fn new(config: &Config) -> Result<Self> {
        let repository: DynTransferRepository = match config.store_backend {
            StoreBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("DATABASE_URL is required for the postgres store"))?;

                let pool = ConnectionManager::new_pool(database_url, config.run_migrations)
                    .await
                    .context("Error connecting to the transfer store")?;

                info!("🗄️ Using PostgreSQL transfer store");
                Arc::new(TransferRepository::new(pool)) as DynTransferRepository
            }
            StoreBackend::Sheet => {
                info!("📄 Using in-process sheet transfer store");
                Arc::new(SheetTransferRepository::new()) as DynTransferRepository
            }
        };

        let clock = Arc::new(SystemClock::new(config.utc_offset)) as DynClock;

        Ok(Self::with_parts(repository, clock))
    }

    pub fn with_parts(repository: DynTransferRepository, clock: DynClock) -> Self {
        let mut registry = Registry::default();
        let metrics = Arc::new(Metrics::new());

        let di_container =
            DependenciesInject::new(repository, clock, metrics.clone(), &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            metrics,
        }
    }
}
