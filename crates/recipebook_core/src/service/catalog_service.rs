//! Catalog use-case service.
//!
//! # Responsibility
//! - Expose category/recipe CRUD entry points for transport callers.
//! - Enforce cross-collection rules: reference validation and cascade delete.
//!
//! # Invariants
//! - After `delete_category(c)` succeeds, no recipe references `c`.
//! - Recipe writes only reference categories that exist at write time.
//! - Names are unique per collection after normalization.
//! - Catalog mutations are serialized by one write gate, so validation and
//!   cascade observe a stable view of both collections.

use crate::config::StorageConfig;
use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::recipe::{Recipe, RecipeDraft, RecipeId};
use crate::model::validation::ValidationError;
use crate::model::{Entity, EntityId};
use crate::store::entity_store::{EntityStore, StoreError};
use crate::store::json_file_store::JsonFileStore;
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Input was rejected before reaching storage.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound {
        collection: &'static str,
        id: EntityId,
    },
    /// Stripping references from recipes failed; the category was kept.
    Cascade {
        category_id: CategoryId,
        source: StoreError,
    },
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Cascade {
                category_id,
                source,
            } => write!(
                f,
                "failed to remove category {category_id} from recipes: {source}"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Cascade { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Store(other),
        }
    }
}

/// Catalog facade over one category store and one recipe store.
pub struct CatalogService<C, R>
where
    C: EntityStore<Category>,
    R: EntityStore<Recipe>,
{
    categories: C,
    recipes: R,
    write_gate: Mutex<()>,
}

/// Catalog backed by the two JSON collection files.
pub type FileCatalogService = CatalogService<JsonFileStore<Category>, JsonFileStore<Recipe>>;

impl FileCatalogService {
    /// Validates storage config and opens both collection files.
    pub fn open(config: &StorageConfig) -> CatalogResult<Self> {
        config
            .validate()
            .map_err(|err| StoreError::Configuration(err.to_string()))?;
        let categories = JsonFileStore::open(&config.categories_path)?;
        let recipes = JsonFileStore::open(&config.recipes_path)?;
        Ok(Self::new(categories, recipes))
    }
}

impl<C, R> CatalogService<C, R>
where
    C: EntityStore<Category>,
    R: EntityStore<Recipe>,
{
    /// Creates a service using the provided store implementations.
    pub fn new(categories: C, recipes: R) -> Self {
        Self {
            categories,
            recipes,
            write_gate: Mutex::new(()),
        }
    }

    pub fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.list()?)
    }

    pub fn get_category(&self, id: CategoryId) -> CatalogResult<Category> {
        Ok(self.categories.get(id)?)
    }

    /// Creates one category with a store-assigned id.
    pub fn create_category(&self, draft: CategoryDraft) -> CatalogResult<Category> {
        let category = draft.into_category()?;
        let _gate = self.gate();
        self.ensure_category_name_free(&category.name, None)?;
        Ok(self.categories.create(category)?)
    }

    /// Renames one category. Identifier is kept.
    pub fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> CatalogResult<Category> {
        let category = draft.into_category()?;
        let _gate = self.gate();
        self.categories.get(id)?;
        self.ensure_category_name_free(&category.name, Some(id))?;
        Ok(self.categories.update(id, category)?)
    }

    /// Deletes one category after stripping it from every recipe.
    ///
    /// # Contract
    /// - Fails with `NotFound` before touching recipes when `id` is absent.
    /// - Recipes are rewritten first; a failure there keeps the category
    ///   and reports `Cascade`.
    pub fn delete_category(&self, id: CategoryId) -> CatalogResult<Category> {
        let _gate = self.gate();
        self.categories.get(id)?;

        let mut detached = 0usize;
        self.recipes
            .update_all(|recipes| {
                for recipe in recipes.iter_mut() {
                    if recipe.remove_category(id) {
                        detached += 1;
                    }
                }
            })
            .map_err(|source| {
                error!(
                    "event=category_delete module=catalog status=error phase=cascade category_id={} error={}",
                    id, source
                );
                CatalogError::Cascade {
                    category_id: id,
                    source,
                }
            })?;

        let removed = self.categories.delete(id)?;
        info!(
            "event=category_delete module=catalog status=ok category_id={} recipes_detached={}",
            id, detached
        );
        Ok(removed)
    }

    pub fn list_recipes(&self) -> CatalogResult<Vec<Recipe>> {
        Ok(self.recipes.list()?)
    }

    pub fn get_recipe(&self, id: RecipeId) -> CatalogResult<Recipe> {
        Ok(self.recipes.get(id)?)
    }

    /// Creates one recipe. Every referenced category must exist.
    pub fn create_recipe(&self, draft: RecipeDraft) -> CatalogResult<Recipe> {
        let recipe = draft.into_recipe()?;
        let _gate = self.gate();
        self.ensure_recipe_name_free(&recipe.name, None)?;
        self.ensure_categories_exist(&recipe.category_ids)?;
        Ok(self.recipes.create(recipe)?)
    }

    /// Replaces every field of one recipe. Identifier is kept.
    pub fn update_recipe(&self, id: RecipeId, draft: RecipeDraft) -> CatalogResult<Recipe> {
        let recipe = draft.into_recipe()?;
        let _gate = self.gate();
        self.recipes.get(id)?;
        self.ensure_recipe_name_free(&recipe.name, Some(id))?;
        self.ensure_categories_exist(&recipe.category_ids)?;
        Ok(self.recipes.update(id, recipe)?)
    }

    /// Deletes one recipe. Nothing references recipes, so no cascade.
    pub fn delete_recipe(&self, id: RecipeId) -> CatalogResult<Recipe> {
        let _gate = self.gate();
        Ok(self.recipes.delete(id)?)
    }

    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_category_name_free(&self, name: &str, owner: Option<CategoryId>) -> CatalogResult<()> {
        let categories = self.categories.list()?;
        ensure_name_free(&categories, name, owner, |c| &c.name)
    }

    fn ensure_recipe_name_free(&self, name: &str, owner: Option<RecipeId>) -> CatalogResult<()> {
        let recipes = self.recipes.list()?;
        ensure_name_free(&recipes, name, owner, |r| &r.name)
    }

    fn ensure_categories_exist(&self, ids: &[CategoryId]) -> CatalogResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let known: HashSet<CategoryId> = self
            .categories
            .list()?
            .into_iter()
            .map(|category| category.id)
            .collect();
        match ids.iter().find(|id| !known.contains(*id)) {
            Some(unknown) => Err(ValidationError::UnknownCategory(*unknown).into()),
            None => Ok(()),
        }
    }
}

fn ensure_name_free<T: Entity>(
    records: &[T],
    name: &str,
    owner: Option<EntityId>,
    name_of: impl Fn(&T) -> &String,
) -> CatalogResult<()> {
    let taken = records
        .iter()
        .any(|record| name_of(record) == name && Some(record.id()) != owner);
    if taken {
        return Err(ValidationError::DuplicateName {
            collection: T::COLLECTION,
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}
