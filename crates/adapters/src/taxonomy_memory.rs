//! In-memory taxonomy repository for testing and scratch trees

use async_trait::async_trait;
use std::sync::RwLock;
use tagtree_domain::{RepoError, Taxonomy, TaxonomyRepo};

/// In-memory repository holding at most one taxonomy
pub struct InMemoryTaxonomyRepo {
    taxonomy: RwLock<Option<Taxonomy>>,
}

impl InMemoryTaxonomyRepo {
    pub fn new() -> Self {
        Self {
            taxonomy: RwLock::new(None),
        }
    }

    /// Start with `taxonomy` already stored
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: RwLock::new(Some(taxonomy)),
        }
    }
}

impl Default for InMemoryTaxonomyRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxonomyRepo for InMemoryTaxonomyRepo {
    async fn load(&self) -> Result<Taxonomy, RepoError> {
        let taxonomy = self
            .taxonomy
            .read()
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        taxonomy
            .clone()
            .ok_or_else(|| RepoError::NotFound("in-memory taxonomy".to_string()))
    }

    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), RepoError> {
        let mut stored = self
            .taxonomy
            .write()
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        *stored = Some(taxonomy.clone());
        Ok(())
    }
}
