use super::{newest_first, MemoryStore};
use async_trait::async_trait;
use crate::error::StoreError;
use crate::model::{MemoryId, MemoryRecord, MemoryUpdate, NewMemory};
use chrono::Utc;
use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// All records of all owners kept as one JSON array on disk.
///
/// Every call re-reads the file, and every mutation rewrites it whole through a
/// sibling `.tmp` file that is synced and renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.io
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))
    }

    fn read_all(&self) -> Result<Vec<MemoryRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "Could not read '{}': {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::Unavailable(format!("Corrupt store '{}': {}", self.path.display(), e))
        })
    }

    fn write_all(&self, records: &[MemoryRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("Could not create '{}': {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        atomic_write(&self.path, json.as_bytes()).map_err(|e| {
            StoreError::Unavailable(format!("Could not write '{}': {}", self.path.display(), e))
        })?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// `{path}.tmp`, in the same directory so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replaces `path` with `contents` or leaves the old file untouched.
fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp = temp_path(path);
    {
        let mut file = fs::File::create(&temp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&temp, path)
}

#[async_trait]
impl MemoryStore for JsonFileStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<MemoryRecord>, StoreError> {
        let _io = self.guard()?;
        let mut out: Vec<MemoryRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.user_id == owner)
            .collect();
        newest_first(&mut out);
        Ok(out)
    }

    async fn create(&self, owner: &str, memory: NewMemory) -> Result<MemoryRecord, StoreError> {
        memory.validate()?;
        let _io = self.guard()?;
        let mut all = self.read_all()?;
        let record = memory.into_record(MemoryId::new(Uuid::new_v4().to_string()), owner, Utc::now());
        all.push(record.clone());
        self.write_all(&all)?;
        Ok(record)
    }

    async fn update(&self, id: &MemoryId, update: &MemoryUpdate) -> Result<(), StoreError> {
        update.validate()?;
        let _io = self.guard()?;
        let mut all = self.read_all()?;
        let record = all
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        record.apply(update, Utc::now());
        self.write_all(&all)
    }

    async fn delete(&self, id: &MemoryId) -> Result<(), StoreError> {
        let _io = self.guard()?;
        let mut all = self.read_all()?;
        let before = all.len();
        all.retain(|r| &r.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.write_all(&all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location;

    fn memory(title: &str) -> NewMemory {
        NewMemory::new(title, "a story", Location::new(10.0, 20.0, "Somewhere").unwrap())
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("memories.json");

        let store = JsonFileStore::new(&path);
        let created = store.create("u1", memory("first")).await.unwrap();
        store.create("u2", memory("other owner")).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        let listed = reopened.list_by_owner("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        reopened.delete(&created.id).await.unwrap();
        assert!(store.list_by_owner("u1").await.unwrap().is_empty());
        assert_eq!(store.list_by_owner("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_empty_and_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.json");
        let store = JsonFileStore::new(&path);
        assert!(store.list_by_owner("u1").await.unwrap().is_empty());

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            store.list_by_owner("u1").await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn interrupted_write_leaves_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.json");
        let store = JsonFileStore::new(&path);
        let first = store.create("u1", memory("first")).await.unwrap();

        // A write that died before its rename
        let temp = temp_path(&path);
        assert_eq!(temp, dir.path().join("memories.json.tmp"));
        fs::write(&temp, "[{\"id\": \"half").unwrap();

        let listed = store.list_by_owner("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, first.id);

        // The next write replaces the leftover and cleans it up
        store.create("u1", memory("second")).await.unwrap();
        assert!(!temp.exists());
        assert_eq!(store.list_by_owner("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("m.json"));
        let id = MemoryId::from("nope");
        assert_eq!(store.delete(&id).await, Err(StoreError::NotFound(id.clone())));
        assert_eq!(
            store.update(&id, &MemoryUpdate::default()).await,
            Err(StoreError::NotFound(id))
        );
    }
}
