//! Persistence seam. The journal and game only ever see [`MemoryStore`]; whether the
//! records live in a document database, a REST backend or a local file is up to the
//! implementation.

pub mod import;
pub mod json_file;
pub mod memory;
pub mod samples;

pub use self::json_file::JsonFileStore;
pub use self::memory::InMemoryStore;

use async_trait::async_trait;
use crate::error::StoreError;
use crate::model::{MemoryId, MemoryRecord, MemoryUpdate, NewMemory};
use std::sync::Arc;

#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Every memory owned by `owner`, newest `created_at` first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Assigns an id and persists. Fails with `Validation` when a required field is missing.
    async fn create(&self, owner: &str, memory: NewMemory) -> Result<MemoryRecord, StoreError>;

    async fn update(&self, id: &MemoryId, update: &MemoryUpdate) -> Result<(), StoreError>;

    async fn delete(&self, id: &MemoryId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: MemoryStore + ?Sized> MemoryStore for Arc<S> {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        (**self).list_by_owner(owner).await
    }

    async fn create(&self, owner: &str, memory: NewMemory) -> Result<MemoryRecord, StoreError> {
        (**self).create(owner, memory).await
    }

    async fn update(&self, id: &MemoryId, update: &MemoryUpdate) -> Result<(), StoreError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: &MemoryId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

/// Newest first, the order every store hands records back in.
pub(crate) fn newest_first(records: &mut [MemoryRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
