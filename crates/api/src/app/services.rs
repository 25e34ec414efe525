use std::sync::Arc;

use beerstock_infra::{
    BeerRepository, BeerService, InMemoryBeerRepository, PostgresBeerRepository, RepositoryError,
    StoreConfig,
};

/// Record store shared by every request, behind a trait object so the router
/// does not depend on which backend was configured.
pub type SharedRepository = Arc<dyn BeerRepository>;

/// Services available to handlers (injected as an `Extension`).
#[derive(Clone)]
pub struct AppServices {
    beers: BeerService<SharedRepository>,
    store_kind: &'static str,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryBeerRepository::new()), "in_memory")
    }

    pub fn with_repository(repository: SharedRepository, store_kind: &'static str) -> Self {
        Self {
            beers: BeerService::new(repository),
            store_kind,
        }
    }

    pub fn beers(&self) -> &BeerService<SharedRepository> {
        &self.beers
    }

    pub fn store_kind(&self) -> &'static str {
        self.store_kind
    }
}

/// Build services for the configured record store.
pub async fn build_services(store: &StoreConfig) -> Result<AppServices, RepositoryError> {
    let services = match store {
        StoreConfig::InMemory => AppServices::in_memory(),
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let repo = PostgresBeerRepository::connect(database_url, *max_connections).await?;
            AppServices::with_repository(Arc::new(repo), "postgres")
        }
    };

    tracing::info!(store = services.store_kind(), "record store ready");
    Ok(services)
}
