//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate entity store calls into catalog-level APIs.
//! - Keep transport layers decoupled from storage details.

pub mod catalog_service;
