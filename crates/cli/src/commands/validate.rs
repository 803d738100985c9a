//! Validate command - report every problem in a taxonomy file

use anyhow::{Context, Result};
use std::path::PathBuf;
use tagtree_domain::{build_index, fingerprint, import_taxonomy, validate_json};

use crate::args::ValidateArgs;
use crate::commands::Workspace;

pub async fn execute(args: ValidateArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let path = workspace.repo.path();

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read taxonomy: {}", path.display()))?;

    let options = workspace.config.import_options(args.source.allow_tag_children);
    let report = validate_json(&content, &options.validation);

    let summary = if report.valid {
        let taxonomy = import_taxonomy(&content, &options)?;
        let index = build_index(&taxonomy).context("Failed to index taxonomy")?;
        Some((index.len(), index.roots().len(), fingerprint(&taxonomy)))
    } else {
        None
    };

    if args.json {
        let output = serde_json::json!({
            "valid": report.valid,
            "errors": report.errors,
            "nodes": summary.as_ref().map(|(nodes, _, _)| nodes),
            "fingerprint": summary.as_ref().map(|(_, _, hash)| hash),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Validating taxonomy: {}", path.display());
        if let Some((nodes, roots, hash)) = &summary {
            println!("✓ Validation passed ({} nodes, {} roots)", nodes, roots);
            println!("  Fingerprint: {}", hash);
        } else {
            eprintln!("✗ Validation failed ({} errors)", report.errors.len());
            for error in &report.errors {
                let code = serde_json::to_value(error.code)?;
                eprintln!(
                    "  - {} [{}] {}",
                    error.path,
                    code.as_str().unwrap_or_default(),
                    error.message
                );
            }
        }
    }

    if !report.valid {
        std::process::exit(1);
    }

    Ok(())
}
