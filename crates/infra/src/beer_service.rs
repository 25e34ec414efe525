//! Inventory service: the rules that sit between the HTTP layer and the store.
//!
//! Every operation is a single read-check-write against the injected
//! [`BeerRepository`]:
//!
//! ```text
//! Request
//!   ↓
//! 1. Validate input (pure, no IO)
//!   ↓
//! 2. Load current state from the store
//!   ↓
//! 3. Apply the domain rule (uniqueness, existence, stock bounds)
//!   ↓
//! 4. Persist (only if step 3 succeeded)
//! ```
//!
//! There is no locking or retry. Two concurrent adjustments of the same record
//! can race, and the last write wins.

use thiserror::Error;
use tracing::{info, instrument, warn};

use beerstock_core::{BeerId, DomainError};
use beerstock_inventory::{validate_amount, Beer, NewBeer, StockAdjustment};

use crate::repository::{BeerRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the request (deterministic).
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Beer inventory service over any record store.
#[derive(Debug, Clone)]
pub struct BeerService<R> {
    repository: R,
}

impl<R> BeerService<R>
where
    R: BeerRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Store a new record, rejecting names that are already taken.
    #[instrument(skip(self, beer), fields(name = %beer.name))]
    pub async fn create(&self, beer: NewBeer) -> ServiceResult<Beer> {
        beer.validate()?;

        if self.repository.find_by_name(&beer.name).await?.is_some() {
            warn!("beer name already registered");
            return Err(DomainError::already_exists(format!(
                "beer with name {} already registered",
                beer.name
            ))
            .into());
        }

        let stored = self.repository.insert(beer).await?;
        info!(id = %stored.id, "beer created");
        Ok(stored)
    }

    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Beer> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("beer with name {name}")).into())
    }

    pub async fn find_by_id(&self, id: BeerId) -> ServiceResult<Beer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("beer with id {id}")).into())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Beer>> {
        Ok(self.repository.find_all().await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_by_id(&self, id: BeerId) -> ServiceResult<()> {
        self.find_by_id(id).await?;

        if !self.repository.delete_by_id(id).await? {
            // Removed by someone else between the check and the delete.
            return Err(DomainError::not_found(format!("beer with id {id}")).into());
        }
        info!("beer deleted");
        Ok(())
    }

    pub async fn increment(&self, id: BeerId, amount: i64) -> ServiceResult<Beer> {
        self.adjust(id, StockAdjustment::Increment, amount).await
    }

    pub async fn decrement(&self, id: BeerId, amount: i64) -> ServiceResult<Beer> {
        self.adjust(id, StockAdjustment::Decrement, amount).await
    }

    #[instrument(skip(self), fields(id = %id, adjustment = adjustment.as_str()))]
    async fn adjust(
        &self,
        id: BeerId,
        adjustment: StockAdjustment,
        amount: i64,
    ) -> ServiceResult<Beer> {
        // Checked before the lookup so a bad amount is a Validation error even
        // for an unknown id. `Beer::adjust` repeats the check for direct callers.
        validate_amount(amount)?;

        let current = self.find_by_id(id).await?;
        let updated = current.adjust(adjustment, amount).inspect_err(|e| {
            warn!(quantity = current.quantity, max = current.max, "stock adjustment rejected: {e}");
        })?;

        let saved = self.repository.save(&updated).await?;
        info!(from = current.quantity, to = saved.quantity, "stock adjusted");
        Ok(saved)
    }
}
