//! src/services/bottle_service.rs
//!
//! BottleService — the business rules of the bottle resource. Every operation
//! is scoped to the requesting account: a bottle owned by someone else looks
//! exactly like one that does not exist.
//!
//! Update and rate are read-modify-write without a concurrency token, so two
//! concurrent writers to the same bottle can lose an update.

use crate::{
    models::bottle::{
        BottleView, CreateBottlePayload, NewBottle, RateBottlePayload, UpdateBottlePayload,
    },
    services::bottle_store::{BottleStore, StoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing, or owned by a different account.
    #[error("bottle not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::Database(err) => ServiceError::Database(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct BottleService {
    store: Arc<dyn BottleStore>,
}

impl BottleService {
    pub fn new(store: Arc<dyn BottleStore>) -> Self {
        Self { store }
    }

    /// Readiness round-trip to the underlying store.
    pub async fn ping(&self) -> ServiceResult<()> {
        Ok(self.store.ping().await?)
    }

    /// Create a bottle owned by `account_id`. The returned view's `href` is the
    /// location reference to hand back to the client.
    pub async fn create(
        &self,
        account_id: i64,
        payload: CreateBottlePayload,
    ) -> ServiceResult<BottleView> {
        let bottle = self
            .store
            .add(NewBottle::from_payload(account_id, payload))
            .await?;
        info!(account_id, bottle_id = bottle.id, "created bottle");
        Ok(bottle.into())
    }

    pub async fn show(&self, account_id: i64, bottle_id: i64) -> ServiceResult<BottleView> {
        Ok(self.store.get_full(account_id, bottle_id).await?)
    }

    pub async fn list(&self, account_id: i64) -> ServiceResult<Vec<BottleView>> {
        let bottles = self.store.list(account_id).await?;
        debug!(account_id, count = bottles.len(), "listed bottles");
        Ok(bottles.into_iter().map(BottleView::from).collect())
    }

    /// Apply a partial update. See [`UpdateBottlePayload`] for which fields are
    /// presence-checked and which are copied unconditionally.
    pub async fn update(
        &self,
        account_id: i64,
        bottle_id: i64,
        payload: UpdateBottlePayload,
    ) -> ServiceResult<()> {
        let mut bottle = self.store.get_for_account(account_id, bottle_id).await?;
        payload.apply_to(&mut bottle);
        self.store.update(&bottle).await?;
        debug!(account_id, bottle_id, "updated bottle");
        Ok(())
    }

    /// Set the rating of a bottle, leaving every other field untouched.
    pub async fn rate(
        &self,
        account_id: i64,
        bottle_id: i64,
        payload: RateBottlePayload,
    ) -> ServiceResult<()> {
        let mut bottle = self.store.get_for_account(account_id, bottle_id).await?;
        bottle.rating = Some(payload.rating);
        self.store.update(&bottle).await?;
        debug!(account_id, bottle_id, rating = payload.rating, "rated bottle");
        Ok(())
    }

    pub async fn delete(&self, account_id: i64, bottle_id: i64) -> ServiceResult<()> {
        self.store.delete_for_account(account_id, bottle_id).await?;
        info!(account_id, bottle_id, "deleted bottle");
        Ok(())
    }
}
