//! Entity store contract and error types.
//!
//! # Responsibility
//! - Define the CRUD surface every collection backend provides.
//! - Keep storage failures distinguishable from semantic not-found results.
//!
//! # Invariants
//! - Identifiers are assigned by the store on `create`; caller ids are ignored.
//! - `update` never changes a record identifier.
//! - A missing record is always `StoreError::NotFound`, never an empty value.

use crate::model::{Entity, EntityId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface for entity store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Store was constructed with an unusable path.
    Configuration(String),
    /// Collection file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Collection file is not a valid serialized collection.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be serialized for writing.
    Encode(serde_json::Error),
    /// A rewritten collection would contain the same id twice.
    DuplicateId {
        collection: &'static str,
        id: EntityId,
    },
    /// No record with this id exists in the collection.
    NotFound {
        collection: &'static str,
        id: EntityId,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(message) => write!(f, "store configuration error: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to access `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "invalid collection data in `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {collection}")
            }
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Configuration(_) => None,
            Self::DuplicateId { .. } => None,
            Self::NotFound { .. } => None,
        }
    }
}

/// Durable CRUD over one homogeneous collection.
///
/// Mutations are linearized per collection: each one runs its full
/// read-modify-write span under an exclusive lock.
pub trait EntityStore<T: Entity> {
    /// Returns every record in insertion order.
    fn list(&self) -> StoreResult<Vec<T>>;

    /// Returns the first record with `id`.
    fn get(&self, id: EntityId) -> StoreResult<T>;

    /// Assigns a fresh id, appends the record and returns the stored copy.
    fn create(&self, record: T) -> StoreResult<T>;

    /// Replaces every field of record `id` with `values`, keeping `id`.
    fn update(&self, id: EntityId, values: T) -> StoreResult<T>;

    /// Removes record `id` and returns it.
    fn delete(&self, id: EntityId) -> StoreResult<T>;

    /// Persists `records` as the entire collection.
    fn replace_all(&self, records: Vec<T>) -> StoreResult<()>;

    /// Loads the collection, lets `mutate` rewrite it, then persists it,
    /// all within one exclusive lock span. Returns the persisted collection.
    fn update_all<F>(&self, mutate: F) -> StoreResult<Vec<T>>
    where
        F: FnOnce(&mut Vec<T>);
}
