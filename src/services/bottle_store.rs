//! src/services/bottle_store.rs
//!
//! Persistence for bottles. `BottleStore` is the seam the service is written
//! against; `SqliteBottleStore` is the production implementation backed by a
//! shared SQLite pool.

use crate::models::bottle::{Bottle, BottleView, NewBottle};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The record does not exist, or exists under another account.
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data-access operations over bottles.
///
/// Every lookup either succeeds or returns [`StoreError::NotFound`], which
/// callers can tell apart from any other failure.
#[async_trait]
pub trait BottleStore: Send + Sync {
    /// Insert a bottle and return it with its assigned identifier.
    async fn add(&self, bottle: NewBottle) -> StoreResult<Bottle>;

    /// Load a bottle by identifier alone, regardless of owner.
    async fn get(&self, id: i64) -> StoreResult<Bottle>;

    /// Load a bottle owned by `account_id`.
    async fn get_for_account(&self, account_id: i64, id: i64) -> StoreResult<Bottle>;

    /// Load a bottle owned by `account_id` in its display form.
    async fn get_full(&self, account_id: i64, id: i64) -> StoreResult<BottleView> {
        self.get_for_account(account_id, id)
            .await
            .map(BottleView::from)
    }

    /// Persist every mutable field of `bottle` and bump `updated_at`.
    async fn update(&self, bottle: &Bottle) -> StoreResult<()>;

    /// Delete a bottle by identifier alone, regardless of owner.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Delete a bottle only if it is owned by `account_id`.
    async fn delete_for_account(&self, account_id: i64, id: i64) -> StoreResult<()>;

    /// All bottles of `account_id`, ordered by identifier.
    async fn list(&self, account_id: i64) -> StoreResult<Vec<Bottle>>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}

const BOTTLE_COLUMNS: &str = "id, account_id, color, country, name, region, review, sweetness, \
     varietal, vineyard, vintage, rating, created_at, updated_at";

/// `BottleStore` backed by SQLite through sqlx.
#[derive(Clone)]
pub struct SqliteBottleStore {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl SqliteBottleStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

fn not_found_or(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl BottleStore for SqliteBottleStore {
    async fn add(&self, bottle: NewBottle) -> StoreResult<Bottle> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Bottle>(&format!(
            "INSERT INTO bottles (
                account_id, color, country, name, region, review, sweetness,
                varietal, vineyard, vintage, rating, created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
             RETURNING {}",
            BOTTLE_COLUMNS
        ))
        .bind(bottle.account_id)
        .bind(&bottle.color)
        .bind(&bottle.country)
        .bind(&bottle.name)
        .bind(&bottle.region)
        .bind(&bottle.review)
        .bind(bottle.sweetness)
        .bind(&bottle.varietal)
        .bind(&bottle.vineyard)
        .bind(bottle.vintage)
        .bind(now)
        .bind(now)
        .fetch_one(&*self.db)
        .await?;

        debug!(
            bottle_id = created.id,
            account_id = created.account_id,
            "inserted bottle"
        );
        Ok(created)
    }

    async fn get(&self, id: i64) -> StoreResult<Bottle> {
        sqlx::query_as::<_, Bottle>(&format!(
            "SELECT {} FROM bottles WHERE id = ?",
            BOTTLE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(not_found_or)
    }

    async fn get_for_account(&self, account_id: i64, id: i64) -> StoreResult<Bottle> {
        sqlx::query_as::<_, Bottle>(&format!(
            "SELECT {} FROM bottles WHERE account_id = ? AND id = ?",
            BOTTLE_COLUMNS
        ))
        .bind(account_id)
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(not_found_or)
    }

    async fn update(&self, bottle: &Bottle) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE bottles SET
                color = ?, country = ?, name = ?, region = ?, review = ?,
                sweetness = ?, varietal = ?, vineyard = ?, vintage = ?,
                rating = ?, updated_at = ?
             WHERE id = ? AND account_id = ?",
        )
        .bind(&bottle.color)
        .bind(&bottle.country)
        .bind(&bottle.name)
        .bind(&bottle.region)
        .bind(&bottle.review)
        .bind(bottle.sweetness)
        .bind(&bottle.varietal)
        .bind(&bottle.vineyard)
        .bind(bottle.vintage)
        .bind(bottle.rating)
        .bind(Utc::now())
        .bind(bottle.id)
        .bind(bottle.account_id)
        .execute(&*self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM bottles WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_for_account(&self, account_id: i64, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM bottles WHERE account_id = ? AND id = ?")
            .bind(account_id)
            .bind(id)
            .execute(&*self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        debug!(bottle_id = id, account_id, "deleted bottle");
        Ok(())
    }

    async fn list(&self, account_id: i64) -> StoreResult<Vec<Bottle>> {
        let rows = sqlx::query_as::<_, Bottle>(&format!(
            "SELECT {} FROM bottles WHERE account_id = ? ORDER BY id ASC",
            BOTTLE_COLUMNS
        ))
        .bind(account_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> StoreResult<()> {
        let one = sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        if one != 1 {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "unexpected result: {}",
                one
            ))));
        }
        Ok(())
    }
}
