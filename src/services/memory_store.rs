//! In-memory `BottleStore` used by service and handler tests.

use crate::{
    models::bottle::{Bottle, NewBottle},
    services::bottle_store::{BottleStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

#[derive(Default)]
pub struct MemoryBottleStore {
    rows: Mutex<BTreeMap<i64, Bottle>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
    updates: AtomicUsize,
}

impl MemoryBottleStore {
    /// Make every subsequent call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self, id: i64) -> Option<Bottle> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl BottleStore for MemoryBottleStore {
    async fn add(&self, bottle: NewBottle) -> StoreResult<Bottle> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let now = Utc::now();
        let created = Bottle {
            id,
            account_id: bottle.account_id,
            color: bottle.color,
            country: bottle.country,
            name: bottle.name,
            region: bottle.region,
            review: bottle.review,
            sweetness: bottle.sweetness,
            varietal: bottle.varietal,
            vineyard: bottle.vineyard,
            vintage: bottle.vintage,
            rating: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> StoreResult<Bottle> {
        self.check()?;
        self.snapshot(id).ok_or(StoreError::NotFound)
    }

    async fn get_for_account(&self, account_id: i64, id: i64) -> StoreResult<Bottle> {
        self.check()?;
        self.snapshot(id)
            .filter(|b| b.account_id == account_id)
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, bottle: &Bottle) -> StoreResult<()> {
        self.check()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&bottle.id) {
            Some(row) if row.account_id == bottle.account_id => {
                *row = bottle.clone();
                row.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn delete_for_account(&self, account_id: i64, id: i64) -> StoreResult<()> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get(&id) {
            Some(row) if row.account_id == account_id => {
                rows.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn list(&self, account_id: i64) -> StoreResult<Vec<Bottle>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}
