//! Beer record storage abstractions.
//!
//! The store only persists and retrieves records. Business rules (name
//! uniqueness, stock bounds) live in the service layer, so no store enforces
//! them.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use beerstock_core::BeerId;
use beerstock_inventory::{Beer, NewBeer};

pub use in_memory::InMemoryBeerRepository;
pub use postgres::PostgresBeerRepository;

/// Record store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// `save` was called for a record that is not stored.
    #[error("beer not found: {0}")]
    NotFound(BeerId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence for beer records, keyed by a store-assigned numeric id.
#[async_trait::async_trait]
pub trait BeerRepository: Send + Sync {
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError>;

    /// All stored records, ascending by id.
    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError>;

    /// Store a new record and return it with its assigned id.
    async fn insert(&self, beer: NewBeer) -> Result<Beer, RepositoryError>;

    /// Overwrite an existing record.
    async fn save(&self, beer: &Beer) -> Result<Beer, RepositoryError>;

    /// Remove a record. Returns `false` if nothing was stored under `id`.
    async fn delete_by_id(&self, id: BeerId) -> Result<bool, RepositoryError>;
}

#[async_trait::async_trait]
impl<S> BeerRepository for Arc<S>
where
    S: BeerRepository + ?Sized,
{
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        (**self).find_by_name(name).await
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        (**self).find_all().await
    }

    async fn insert(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        (**self).insert(beer).await
    }

    async fn save(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        (**self).save(beer).await
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<bool, RepositoryError> {
        (**self).delete_by_id(id).await
    }
}
