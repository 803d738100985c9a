//! Subcommand implementations

pub mod add;
pub mod config;
pub mod export;
pub mod new;
pub mod normalize;
pub mod search;
pub mod tree;
pub mod validate;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tagtree_adapters::storage::FilesystemTaxonomyRepo;
use tagtree_domain::{Taxonomy, TaxonomyIndex, TaxonomyRepo, build_index};

use crate::args::TaxonomySource;
use crate::config::AppConfig;

/// Configuration plus the repository a command reads from
pub(crate) struct Workspace {
    pub config: AppConfig,
    pub repo: FilesystemTaxonomyRepo,
}

impl Workspace {
    pub fn open(source: &TaxonomySource, config_path: Option<PathBuf>) -> Result<Self> {
        let config = AppConfig::load(config_path.as_deref())?;
        let path = source
            .file
            .clone()
            .unwrap_or_else(|| config.general.taxonomy_path.clone());
        let repo = FilesystemTaxonomyRepo::new(path)
            .with_import_options(config.import_options(source.allow_tag_children));

        Ok(Self { config, repo })
    }

    pub async fn load(&self) -> Result<Taxonomy> {
        self.repo
            .load()
            .await
            .with_context(|| format!("Failed to load taxonomy: {}", self.repo.path().display()))
    }

    pub async fn load_index(&self) -> Result<(Taxonomy, TaxonomyIndex)> {
        let taxonomy = self.load().await?;
        let index = build_index(&taxonomy).context("Failed to index taxonomy")?;
        Ok((taxonomy, index))
    }
}
