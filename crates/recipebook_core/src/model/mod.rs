//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical records persisted by the entity stores.
//! - Own intrinsic validation and name normalization for those records.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `EntityId`.
//! - Identifiers never change after creation.
//!
//! # See also
//! - crate::store::entity_store

pub mod category;
pub mod recipe;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier shared by every catalog record.
pub type EntityId = Uuid;

/// Record shape that can live in an entity store.
///
/// Implementors expose their identifier so the store can assign it on create
/// and pin it on update.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection name used in file-level diagnostics and error messages.
    const COLLECTION: &'static str;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);
}
