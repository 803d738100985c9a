//! Export command - render the keyword string for a selection

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tagtree_domain::format_for_export;
use tagtree_domain::usecases::KeywordRenderer;

use crate::args::ExportArgs;
use crate::commands::Workspace;

pub async fn execute(args: ExportArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let (_, index) = workspace.load_index().await?;

    let unknown: Vec<&str> = args
        .select
        .iter()
        .map(String::as_str)
        .filter(|id| !index.contains(id))
        .collect();
    if !unknown.is_empty() {
        bail!("Unknown node id(s): {}", unknown.join(", "));
    }

    let mut render_config = workspace.config.render_config();
    if let Some(separator) = args.separator {
        render_config.separator = separator;
    }
    if args.no_ancestors {
        render_config.include_ancestors = false;
    }

    tracing::info!(
        selected = args.select.len(),
        include_ancestors = render_config.include_ancestors,
        "Rendering keyword export"
    );

    let separator = render_config.separator.clone();
    let renderer = KeywordRenderer::new(render_config);
    let ids = renderer
        .ordered_export(&index, &args.select)
        .context("Failed to order export")?;
    let keywords = format_for_export(&index, &ids, &separator);

    if args.json {
        let output = serde_json::json!({
            "ids": ids,
            "keywords": keywords,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", keywords);
    }

    Ok(())
}
