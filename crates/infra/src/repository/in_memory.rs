use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use beerstock_core::{BeerId, Entity};
use beerstock_inventory::{Beer, NewBeer};

use super::{BeerRepository, RepositoryError};

#[derive(Debug)]
struct State {
    next_id: i64,
    rows: BTreeMap<BeerId, Beer>,
}

/// In-memory beer store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryBeerRepository {
    inner: RwLock<State>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Storage("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Storage("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryBeerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|b| b.name == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn insert(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        let mut state = self.write()?;
        let id = BeerId::new(state.next_id);
        state.next_id += 1;

        let stored = beer.with_id(id);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        let mut state = self.write()?;
        match state.rows.get_mut(beer.id()) {
            Some(existing) if existing.same_identity(beer) => {
                *existing = beer.clone();
                Ok(beer.clone())
            }
            _ => Err(RepositoryError::NotFound(beer.id)),
        }
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<bool, RepositoryError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }
}
