//! Recipe record.
//!
//! # Invariants
//! - `category_ids` behaves as a set: no duplicates, first-seen order kept.
//! - Ingredient and instruction order is meaningful and preserved.

use super::category::CategoryId;
use super::validation::{normalize_entries, normalize_name, ValidationError};
use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type RecipeId = EntityId;

/// A recipe with ordered steps and category references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Accepts the legacy `categoriesIds` key written by older backends.
    #[serde(default, alias = "categoriesIds")]
    pub category_ids: Vec<CategoryId>,
}

impl Recipe {
    /// Drops one category reference. Returns whether it was present.
    pub fn remove_category(&mut self, category_id: CategoryId) -> bool {
        let before = self.category_ids.len();
        self.category_ids.retain(|id| *id != category_id);
        self.category_ids.len() != before
    }

    pub fn references(&self, category_id: CategoryId) -> bool {
        self.category_ids.contains(&category_id)
    }
}

/// Identifier-less input for recipe create/update (full replacement).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, alias = "categoriesIds")]
    pub category_ids: Vec<CategoryId>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn ingredient(mut self, value: impl Into<String>) -> Self {
        self.ingredients.push(value.into());
        self
    }

    pub fn instruction(mut self, value: impl Into<String>) -> Self {
        self.instructions.push(value.into());
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_ids.push(id);
        self
    }

    /// Normalizes the draft into a record with a nil id.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank.
    /// - `BlankEntry` when any ingredient/instruction is blank.
    pub fn into_recipe(self) -> Result<Recipe, ValidationError> {
        let name = normalize_name(&self.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let ingredients = normalize_entries("ingredients", &self.ingredients)?;
        let instructions = normalize_entries("instructions", &self.instructions)?;

        let mut seen = HashSet::with_capacity(self.category_ids.len());
        let category_ids = self
            .category_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        Ok(Recipe {
            id: Uuid::nil(),
            name,
            ingredients,
            instructions,
            category_ids,
        })
    }
}

impl From<Recipe> for RecipeDraft {
    fn from(value: Recipe) -> Self {
        Self {
            name: value.name,
            ingredients: value.ingredients,
            instructions: value.instructions,
            category_ids: value.category_ids,
        }
    }
}

impl Entity for Recipe {
    const COLLECTION: &'static str = "recipes";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::{Recipe, RecipeDraft};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    #[test]
    fn draft_deduplicates_categories_in_first_seen_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let recipe = RecipeDraft::new("Pie")
            .category(b)
            .category(a)
            .category(b)
            .into_recipe()
            .unwrap();
        assert_eq!(recipe.category_ids, vec![b, a]);
    }

    #[test]
    fn draft_rejects_blank_instruction() {
        let err = RecipeDraft::new("Pie")
            .ingredient("flour")
            .instruction("bake")
            .instruction("   ")
            .into_recipe()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankEntry {
                field: "instructions",
                index: 1
            }
        );
    }

    #[test]
    fn reads_legacy_categories_ids_key() {
        let category = Uuid::new_v4();
        let json = format!(
            r#"{{"id":"{}","name":"Pie","ingredients":[],"instructions":[],"categoriesIds":["{category}"]}}"#,
            Uuid::new_v4()
        );
        let recipe: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe.category_ids, vec![category]);
    }

    #[test]
    fn writes_camel_case_category_ids_key() {
        let recipe = RecipeDraft::new("Pie").into_recipe().unwrap();
        let json = serde_json::to_value(&recipe).unwrap();
        assert!(json.get("categoryIds").is_some());
        assert!(json.get("category_ids").is_none());
    }

    #[test]
    fn remove_category_reports_presence() {
        let id = Uuid::new_v4();
        let mut recipe = RecipeDraft::new("Pie").category(id).into_recipe().unwrap();
        assert!(recipe.references(id));
        assert!(recipe.remove_category(id));
        assert!(!recipe.remove_category(id));
        assert!(recipe.category_ids.is_empty());
    }
}
