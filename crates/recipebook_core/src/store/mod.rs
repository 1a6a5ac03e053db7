//! Entity store abstractions and file persistence.
//!
//! # Responsibility
//! - Define the collection CRUD contract used by catalog services.
//! - Keep file format and write-atomicity details inside this boundary.
//!
//! # Invariants
//! - Writes replace the whole collection file atomically.
//! - Mutations are linearized per collection.
//!
//! # See also
//! - crate::service::catalog_service

mod atomic_file;
pub mod entity_store;
pub mod json_file_store;
