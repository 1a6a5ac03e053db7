//! Category record.

use super::validation::{normalize_name, ValidationError};
use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = EntityId;

/// A named grouping that recipes can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Identifier-less input for category create/update.
///
/// Unknown fields (including a caller-sent `id`) are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Normalizes the draft into a record with a nil id.
    ///
    /// The store replaces the nil id on create; updates pin the existing one.
    pub fn into_category(self) -> Result<Category, ValidationError> {
        let name = normalize_name(&self.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Category {
            id: Uuid::nil(),
            name,
        })
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
