//! Filesystem-based taxonomy repository

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagtree_domain::{
    Clock, ExportOptions, ImportOptions, RepoError, SystemClock, Taxonomy, TaxonomyRepo,
    export_taxonomy, import_taxonomy,
};

/// Taxonomy stored as a single JSON document
pub struct FsTaxonomyRepo {
    path: PathBuf,
    import_options: ImportOptions,
    clock: Arc<dyn Clock>,
}

impl FsTaxonomyRepo {
    /// Create a repository for the document at `path` (which may not exist yet)
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            import_options: ImportOptions::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_import_options(mut self, options: ImportOptions) -> Self {
        self.import_options = options;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file used for atomic replacement
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "taxonomy.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TaxonomyRepo for FsTaxonomyRepo {
    async fn load(&self) -> Result<Taxonomy, RepoError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(RepoError::NotFound(self.path.display().to_string()));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let taxonomy = import_taxonomy(&content, &self.import_options)?;

        tracing::debug!(
            path = %self.path.display(),
            nodes = taxonomy.nodes.len(),
            "Loaded taxonomy file"
        );

        Ok(taxonomy)
    }

    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = export_taxonomy(
            taxonomy,
            &ExportOptions {
                pretty: true,
                stamp_updated_at: true,
            },
            self.clock.as_ref(),
        )?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, format!("{}\n", json)).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::info!(
            path = %self.path.display(),
            nodes = taxonomy.nodes.len(),
            "Saved taxonomy"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtree_domain::{ErrorCode, FixedClock, ImportError, ValidateOptions};
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn lenient() -> ImportOptions {
        ImportOptions {
            validation: ValidateOptions {
                enforce_leaf_rule: false,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = setup_test_dir();
        let repo = FsTaxonomyRepo::new(dir.path().join("nested/tree.json"))
            .with_import_options(lenient())
            .with_clock(Arc::new(FixedClock::from_unix(0)));

        repo.save(&Taxonomy::sample()).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded.nodes, Taxonomy::sample().nodes);
        assert_eq!(
            loaded.meta.unwrap().updated_at.as_deref(),
            Some("1970-01-01T00:00:00Z")
        );
        assert!(!repo.staging_path().exists());
    }

    #[tokio::test]
    async fn test_load_backfills_order() {
        let dir = setup_test_dir();
        let path = dir.path().join("tree.json");
        let content = serde_json::json!({
            "schemaVersion": "1.0.0",
            "nodes": [
                {"id": "a", "label": "A", "parentId": null, "kind": "tag"},
                {"id": "b", "label": "B", "parentId": null, "kind": "tag"}
            ]
        });
        std::fs::write(&path, content.to_string()).unwrap();

        let loaded = FsTaxonomyRepo::new(&path).load().await.unwrap();
        assert_eq!(loaded.nodes[1].order, Some(1));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_document() {
        let dir = setup_test_dir();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, r#"{"schemaVersion": "9.0.0", "nodes": []}"#).unwrap();

        let result = FsTaxonomyRepo::new(&path).load().await;
        match result {
            Err(RepoError::Import(ImportError::Invalid(errors))) => {
                assert_eq!(errors[0].code, ErrorCode::IncompatibleSchemaVersion);
            }
            other => panic!("unexpected result: {:?}", other.map(|t| t.nodes.len())),
        }
    }

    #[tokio::test]
    async fn test_leaf_rule_applies_by_default() {
        let dir = setup_test_dir();
        let repo = FsTaxonomyRepo::new(dir.path().join("tree.json"));
        repo.save(&Taxonomy::sample()).await.unwrap();

        let result = repo.load().await;
        assert!(matches!(
            result,
            Err(RepoError::Import(ImportError::Invalid(_)))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = setup_test_dir();
        let result = FsTaxonomyRepo::new(dir.path().join("absent.json")).load().await;
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }
}
