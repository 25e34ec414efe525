//! Postgres-backed beer store.
//!
//! Records live in a single `beers` table. Ids come from a `BIGSERIAL`
//! column. The table carries a check constraint mirroring the stock bounds,
//! but no unique constraint on `name`: uniqueness is a service-level check.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | Database (any code) | `Storage` with the operation and database message |
//! | PoolClosed | `Storage` |
//! | RowNotFound | `Storage` (queries use `fetch_optional`/`fetch_all`) |
//! | Other | `Storage` |

use std::sync::Arc;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use beerstock_core::BeerId;
use beerstock_inventory::{Beer, BeerType, NewBeer};

use super::{BeerRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS beers (
    id           BIGSERIAL PRIMARY KEY,
    name         TEXT   NOT NULL,
    brand        TEXT   NOT NULL,
    max_quantity BIGINT NOT NULL CHECK (max_quantity > 0),
    quantity     BIGINT NOT NULL CHECK (quantity >= 0 AND quantity <= max_quantity),
    beer_type    TEXT   NOT NULL
)
"#;

/// Postgres-backed beer store.
///
/// Uses the SQLx connection pool, so a single instance can be shared across
/// request handlers.
#[derive(Debug, Clone)]
pub struct PostgresBeerRepository {
    pool: Arc<PgPool>,
}

impl PostgresBeerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Create the `beers` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BeerRepository for PostgresBeerRepository {
    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, brand, max_quantity, quantity, beer_type
            FROM beers
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, brand, max_quantity, quantity, beer_type
            FROM beers
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_name", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, brand, max_quantity, quantity, beer_type
            FROM beers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(beer_from_row).collect()
    }

    #[instrument(skip(self, beer), fields(name = %beer.name), err)]
    async fn insert(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO beers (name, brand, max_quantity, quantity, beer_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&beer.name)
        .bind(&beer.brand)
        .bind(beer.max)
        .bind(beer.quantity)
        .bind(beer.beer_type.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Storage(format!("failed to read inserted id: {e}")))?;

        Ok(beer.with_id(BeerId::new(id)))
    }

    #[instrument(skip(self, beer), fields(id = %beer.id), err)]
    async fn save(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE beers
            SET name = $2, brand = $3, max_quantity = $4, quantity = $5, beer_type = $6
            WHERE id = $1
            "#,
        )
        .bind(beer.id.value())
        .bind(&beer.name)
        .bind(&beer.brand)
        .bind(beer.max)
        .bind(beer.quantity)
        .bind(beer.beer_type.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(beer.id));
        }
        Ok(beer.clone())
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: BeerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id.value())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn beer_from_row(row: &PgRow) -> Result<Beer, RepositoryError> {
    let read = |e: sqlx::Error| RepositoryError::Storage(format!("failed to read beer row: {e}"));

    let beer_type: String = row.try_get("beer_type").map_err(read)?;
    let beer_type: BeerType = beer_type
        .parse()
        .map_err(|e| RepositoryError::Storage(format!("corrupt beer_type column: {e}")))?;

    Ok(Beer {
        id: BeerId::new(row.try_get("id").map_err(read)?),
        name: row.try_get("name").map_err(read)?,
        brand: row.try_get("brand").map_err(read)?,
        max: row.try_get("max_quantity").map_err(read)?,
        quantity: row.try_get("quantity").map_err(read)?,
        beer_type,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::RowNotFound => {
            RepositoryError::Storage(format!("unexpected row not found in {operation}"))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {operation}: {err}")),
    }
}
