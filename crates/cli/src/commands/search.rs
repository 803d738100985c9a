//! Search command - find nodes by label or alias

use anyhow::Result;
use std::path::PathBuf;
use tagtree_domain::usecases::search;

use crate::args::SearchArgs;
use crate::commands::Workspace;

pub async fn execute(args: SearchArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let (_, index) = workspace.load_index().await?;

    let hits = search(&index, &args.query);
    if hits.is_empty() {
        println!("No nodes match '{}'", args.query);
        return Ok(());
    }

    for id in &hits {
        println!("{}\t{}", id, index.breadcrumb(id).join(" / "));
    }

    Ok(())
}
