//! Add command - append a node to a taxonomy file

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tagtree_domain::{Node, NodeKind, TaxonomyRepo, validate_taxonomy};

use crate::args::{AddArgs, KindArg};
use crate::commands::Workspace;

pub async fn execute(args: AddArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let mut taxonomy = workspace.load().await?;

    let id = args.id.unwrap_or_else(Node::generate_id);
    let kind = match args.kind {
        KindArg::Folder => NodeKind::Folder,
        KindArg::Tag => NodeKind::Tag,
    };
    let siblings = taxonomy
        .nodes
        .iter()
        .filter(|n| n.parent_id == args.parent)
        .count() as i64;

    let node = Node::new(id.clone(), args.label, args.parent.as_deref(), kind)
        .with_order(args.order.unwrap_or(siblings));
    taxonomy.nodes.push(node);

    // Reject the edit before touching the file
    let value = serde_json::to_value(&taxonomy).context("Failed to serialize taxonomy")?;
    let options = workspace.config.validate_options(args.source.allow_tag_children);
    let report = validate_taxonomy(&value, &options);
    if !report.valid {
        for error in &report.errors {
            eprintln!("  - {}", error);
        }
        bail!("Node rejected ({} errors)", report.errors.len());
    }

    workspace
        .repo
        .save(&taxonomy)
        .await
        .context("Failed to save taxonomy")?;

    println!("{}", id);

    Ok(())
}
