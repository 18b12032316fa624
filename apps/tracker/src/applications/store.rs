//! Persistence seam for application records.
//!
//! `AppState` holds an `Arc<dyn ApplicationStore>`: `PgApplicationStore` when
//! a database is configured, `MemoryApplicationStore` otherwise.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Application, NewApplication};

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Every record, in whatever order the backend yields them.
    async fn list(&self) -> Result<Vec<Application>, AppError>;

    /// Persists a new record. The store assigns `id` and `application_date`.
    async fn insert(&self, new: NewApplication) -> Result<Application, AppError>;

    /// Overwrites every mutable field of `id`. Returns the record as it was
    /// before the write, or `None` (store unchanged) when `id` is unknown.
    async fn replace(
        &self,
        id: Uuid,
        fields: NewApplication,
    ) -> Result<Option<Application>, AppError>;

    /// Deletes `id`. Returns whether a record was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Volatile store kept in insertion order.
#[derive(Default)]
pub struct MemoryApplicationStore {
    records: RwLock<Vec<Application>>,
}

impl MemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn list(&self) -> Result<Vec<Application>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, new: NewApplication) -> Result<Application, AppError> {
        let app = new.into_application(Uuid::new_v4(), Utc::now());
        self.records.write().await.push(app.clone());
        info!("Inserted application {}", app.id);
        Ok(app)
    }

    async fn replace(
        &self,
        id: Uuid,
        fields: NewApplication,
    ) -> Result<Option<Application>, AppError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        let updated = fields.into_application(id, slot.application_date);
        let previous = std::mem::replace(slot, updated);
        info!("Replaced application {id}");
        Ok(Some(previous))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|a| a.id != id);
        let removed = records.len() != before;
        if removed {
            info!("Deleted application {id}");
        }
        Ok(removed)
    }
}
