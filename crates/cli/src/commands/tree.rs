//! Tree command - print the taxonomy in display order

use anyhow::Result;
use std::path::PathBuf;

use crate::args::TreeArgs;
use crate::commands::Workspace;

pub async fn execute(args: TreeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(&args.source, config_path)?;
    let (taxonomy, index) = workspace.load_index().await?;

    if let Some(name) = taxonomy.meta.as_ref().and_then(|m| m.name.as_deref()) {
        println!("{}", name);
    }

    for node in index.walk() {
        let depth = index.depth(&node.id).unwrap_or_default();
        let mut line = format!("{}{} [{}]", "  ".repeat(depth), node.label, node.kind);
        if args.ids {
            line.push_str(&format!(" ({})", node.id));
        }
        match node.export {
            Some(true) => line.push_str(" +export"),
            Some(false) => line.push_str(" -export"),
            None => {}
        }
        println!("{}", line);
    }

    Ok(())
}
