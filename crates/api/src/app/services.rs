use std::sync::Arc;

use stockroom_infra::{
    migrations, AppConfig, InMemoryItemCollection, InventoryRepository, ItemCollection,
    PostgresItemCollection,
};

/// Type-erased collection handle shared by every request.
pub type SharedCollection = Arc<dyn ItemCollection>;

/// Long-lived services, built once at startup.
pub struct AppServices {
    inventory: InventoryRepository<SharedCollection>,
    config: AppConfig,
}

impl AppServices {
    pub fn new(collection: SharedCollection, config: AppConfig) -> Self {
        Self {
            inventory: InventoryRepository::new(collection),
            config,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(InMemoryItemCollection::new()), config)
    }

    pub fn inventory(&self) -> &InventoryRepository<SharedCollection> {
        &self.inventory
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Choose the collection from configuration: Postgres when `DATABASE_URL` is
/// set (migrated on startup), in-memory otherwise.
pub async fn build_services(config: AppConfig) -> anyhow::Result<AppServices> {
    let Some(database_url) = config.database_url.clone() else {
        tracing::warn!("DATABASE_URL not set; using in-memory inventory collection");
        return Ok(AppServices::in_memory(config));
    };

    let pool = PostgresItemCollection::connect(&database_url, config.max_connections).await?;
    let applied = migrations::migrate(&pool).await?;
    if !applied.is_empty() {
        tracing::info!(?applied, "database migrated");
    }

    Ok(AppServices::new(
        Arc::new(PostgresItemCollection::new(pool)),
        config,
    ))
}
