//! Core persistence and domain logic for RecipeBook.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::category::{Category, CategoryDraft, CategoryId};
pub use model::recipe::{Recipe, RecipeDraft, RecipeId};
pub use model::validation::{normalize_name, ValidationError};
pub use model::{Entity, EntityId};
pub use service::catalog_service::{
    CatalogError, CatalogResult, CatalogService, FileCatalogService,
};
pub use store::entity_store::{EntityStore, StoreError, StoreResult};
pub use store::json_file_store::JsonFileStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
