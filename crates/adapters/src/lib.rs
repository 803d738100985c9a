//! tagtree adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `taxonomy_fs`: JSON file storage
//! - `taxonomy_memory`: In-memory storage for tests and scratch trees

mod taxonomy_fs;
mod taxonomy_memory;

/// Re-exports for taxonomy storage adapters
pub mod storage {
    pub use crate::taxonomy_fs::FsTaxonomyRepo as FilesystemTaxonomyRepo;
    pub use crate::taxonomy_memory::InMemoryTaxonomyRepo;
}
