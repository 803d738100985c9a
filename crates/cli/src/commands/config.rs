//! Config command - configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub async fn execute(args: ConfigArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => init_config(path, force).await,
        ConfigCommands::Show => show_config(config_path),
    }
}

async fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let content = AppConfig::example_toml();

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point taxonomy_path at your taxonomy JSON");
    println!("  2. Run 'tagtree new --sample' to start from the sample tree");
    println!("  3. Run 'tagtree validate' to check it");
    println!("  4. Run 'tagtree export --select <id>...' to render keywords");

    Ok(())
}

fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
