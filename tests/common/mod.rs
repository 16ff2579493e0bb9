#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mindstamps::error::StoreError;
use mindstamps::geo::Location;
use mindstamps::journal::{JournalChange, JournalObserver};
use mindstamps::model::{MemoryId, MemoryRecord, MemoryUpdate, NewMemory};
use mindstamps::store::{InMemoryStore, MemoryStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "u1";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Builder for MemoryRecord to keep tests short
pub struct RecordBuilder {
    record: MemoryRecord,
}

impl RecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: MemoryRecord {
                id: MemoryId::new(id),
                title: format!("Title {}", id),
                story: format!("Story of {}", id),
                location: Some(Location::new(0.0, 0.0, "Null Island").unwrap()),
                image_data: None,
                user_id: OWNER.to_string(),
                created_at: base_time(),
                updated_at: base_time(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    pub fn at(mut self, lat: f64, lng: f64, name: &str) -> Self {
        self.record.location = Some(Location::new(lat, lng, name).unwrap());
        self
    }

    pub fn no_location(mut self) -> Self {
        self.record.location = None;
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.record.user_id = owner.to_string();
        self
    }

    /// Created this many hours before the base time.
    pub fn hours_ago(mut self, hours: i64) -> Self {
        self.record.created_at = base_time() - Duration::hours(hours);
        self.record.updated_at = self.record.created_at;
        self
    }

    pub fn build(self) -> MemoryRecord {
        self.record
    }
}

/// `n` records "r0".."r{n-1}", r0 the newest, so newest-first order is r0, r1, ...
pub fn records(n: usize) -> Vec<MemoryRecord> {
    (0..n)
        .map(|i| RecordBuilder::new(&format!("r{}", i)).hours_ago(i as i64).build())
        .collect()
}

pub fn ids(records: &[MemoryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

pub fn new_memory(title: &str) -> NewMemory {
    NewMemory::new(title, "a story", Location::new(48.8566, 2.3522, "Paris").unwrap())
}

/// In-memory store whose backend can be switched off, wholly or for listing only.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    down: AtomicBool,
    lists_down: AtomicBool,
}

impl FlakyStore {
    pub fn with_records(records: Vec<MemoryRecord>) -> Self {
        Self {
            inner: InMemoryStore::with_records(records),
            down: AtomicBool::new(false),
            lists_down: AtomicBool::new(false),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Writes keep working, listing fails.
    pub fn set_lists_down(&self, down: bool) {
        self.lists_down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MemoryStore for FlakyStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        self.check()?;
        if self.lists_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("list down".to_string()));
        }
        self.inner.list_by_owner(owner).await
    }

    async fn create(&self, owner: &str, memory: NewMemory) -> Result<MemoryRecord, StoreError> {
        self.check()?;
        self.inner.create(owner, memory).await
    }

    async fn update(&self, id: &MemoryId, update: &MemoryUpdate) -> Result<(), StoreError> {
        self.check()?;
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: &MemoryId) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(id).await
    }
}

/// Collects every change notification.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<JournalChange>>>,
}

impl RecordingObserver {
    pub fn take(&self) -> Vec<JournalChange> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl JournalObserver for RecordingObserver {
    fn on_change(&self, change: &JournalChange) {
        self.events.lock().unwrap().push(change.clone());
    }
}
