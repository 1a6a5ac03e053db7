//! JSON-array file implementation of `EntityStore`.
//!
//! # Responsibility
//! - Persist one collection as a JSON array in a single file.
//! - Serialize writers and give readers a consistent snapshot.
//!
//! # Invariants
//! - The file always holds a complete JSON array (atomic replace on write).
//! - Record order in the file is insertion order; updates keep position.
//! - Only ids and counts are logged, never record contents.

use super::atomic_file::write_atomically;
use super::entity_store::{EntityStore, StoreError, StoreResult};
use crate::model::{Entity, EntityId};
use log::{debug, error, info};
use std::collections::HashSet;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use uuid::Uuid;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// File-backed entity store.
///
/// Assumes it is the only writer of its file within the process.
pub struct JsonFileStore<T: Entity> {
    path: PathBuf,
    // Guards the file, not memory: readers share, mutations hold it exclusively
    // for the whole read-modify-write span.
    lock: RwLock<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T: Entity> std::fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("collection", &T::COLLECTION)
            .field("path", &self.path)
            .finish()
    }
}

impl<T: Entity> JsonFileStore<T> {
    /// Opens a collection file, bootstrapping `[]` when it does not exist.
    ///
    /// # Errors
    /// - `Configuration` when `path` is empty or blank.
    /// - `Io` when the file or its parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(StoreError::Configuration(format!(
                "{} path cannot be empty",
                T::COLLECTION
            )));
        }

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            write_atomically(path, EMPTY_COLLECTION).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(
                "event=store_bootstrap module=store status=ok collection={} path={}",
                T::COLLECTION,
                path.display()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            lock: RwLock::new(()),
            _records: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A panic mid-mutation cannot leave the file half-written, so poisoning
    // carries no state worth refusing over.
    fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_records(&self) -> StoreResult<Vec<T>> {
        let bytes = fs::read(&self.path).map_err(|source| {
            error!(
                "event=store_read module=store status=error collection={} error_code=io error={}",
                T::COLLECTION,
                source
            );
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| {
            error!(
                "event=store_read module=store status=error collection={} error_code=corrupt error={}",
                T::COLLECTION,
                source
            );
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(
            "event=store_read module=store status=ok collection={} records={}",
            T::COLLECTION,
            records.len()
        );
        Ok(records)
    }

    fn write_records(&self, op: &'static str, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        ensure_unique_ids(records)?;
        let bytes = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

        if let Err(source) = write_atomically(&self.path, &bytes) {
            error!(
                "event=store_write module=store status=error op={} collection={} duration_ms={} error={}",
                op,
                T::COLLECTION,
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        info!(
            "event=store_write module=store status=ok op={} collection={} records={} duration_ms={}",
            op,
            T::COLLECTION,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn not_found(id: EntityId) -> StoreError {
        StoreError::NotFound {
            collection: T::COLLECTION,
            id,
        }
    }
}

impl<T: Entity> EntityStore<T> for JsonFileStore<T> {
    fn list(&self) -> StoreResult<Vec<T>> {
        let _guard = self.shared();
        self.read_records()
    }

    fn get(&self, id: EntityId) -> StoreResult<T> {
        let _guard = self.shared();
        self.read_records()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))
    }

    fn create(&self, mut record: T) -> StoreResult<T> {
        let _guard = self.exclusive();
        let mut records = self.read_records()?;

        let taken: HashSet<EntityId> = records.iter().map(|record| record.id()).collect();
        let mut id = Uuid::new_v4();
        while taken.contains(&id) {
            id = Uuid::new_v4();
        }
        record.set_id(id);

        records.push(record.clone());
        self.write_records("create", &records)?;
        Ok(record)
    }

    fn update(&self, id: EntityId, mut values: T) -> StoreResult<T> {
        let _guard = self.exclusive();
        let mut records = self.read_records()?;
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        values.set_id(id);
        *slot = values.clone();
        self.write_records("update", &records)?;
        Ok(values)
    }

    fn delete(&self, id: EntityId) -> StoreResult<T> {
        let _guard = self.exclusive();
        let mut records = self.read_records()?;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let removed = records.remove(index);
        self.write_records("delete", &records)?;
        Ok(removed)
    }

    fn replace_all(&self, records: Vec<T>) -> StoreResult<()> {
        let _guard = self.exclusive();
        self.write_records("replace_all", &records)
    }

    fn update_all<F>(&self, mutate: F) -> StoreResult<Vec<T>>
    where
        F: FnOnce(&mut Vec<T>),
    {
        let _guard = self.exclusive();
        let mut records = self.read_records()?;
        mutate(&mut records);
        self.write_records("update_all", &records)?;
        Ok(records)
    }
}

fn ensure_unique_ids<T: Entity>(records: &[T]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: record.id(),
            });
        }
    }
    Ok(())
}
