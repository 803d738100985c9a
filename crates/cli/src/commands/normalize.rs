//! Normalize command - rewrite sibling orders to 0..n-1

use anyhow::{Context, Result};
use std::path::PathBuf;
use tagtree_adapters::storage::FilesystemTaxonomyRepo;
use tagtree_domain::{TaxonomyRepo, normalize_order};

use crate::args::NormalizeArgs;
use crate::commands::Workspace;

pub async fn execute(args: NormalizeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let taxonomy = normalize_order(workspace.load().await?);

    let target = match args.output {
        Some(path) => FilesystemTaxonomyRepo::new(path),
        None => FilesystemTaxonomyRepo::new(workspace.repo.path()),
    };

    target
        .save(&taxonomy)
        .await
        .with_context(|| format!("Failed to write taxonomy: {}", target.path().display()))?;

    println!(
        "Normalized {} nodes into {}",
        taxonomy.nodes.len(),
        target.path().display()
    );

    Ok(())
}
