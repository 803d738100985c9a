//! New command - create an empty or sample taxonomy file

use anyhow::{Context, Result};
use std::path::PathBuf;
use tagtree_adapters::storage::FilesystemTaxonomyRepo;
use tagtree_domain::{SystemClock, Taxonomy, TaxonomyRepo};

use crate::args::NewArgs;
use crate::config::AppConfig;

pub async fn execute(args: NewArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let path = args.path.unwrap_or(config.general.taxonomy_path);

    if path.exists() && !args.force {
        anyhow::bail!(
            "Taxonomy file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let taxonomy = if args.sample {
        let mut sample = Taxonomy::sample();
        if let Some(name) = args.name {
            sample.meta.get_or_insert_with(Default::default).name = Some(name);
        }
        sample
    } else {
        Taxonomy::new_empty(args.name, &SystemClock)
    };

    let repo = FilesystemTaxonomyRepo::new(&path);
    repo.save(&taxonomy)
        .await
        .with_context(|| format!("Failed to write taxonomy: {}", path.display()))?;

    println!(
        "Created taxonomy with {} nodes: {}",
        taxonomy.nodes.len(),
        path.display()
    );

    Ok(())
}
