//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tagtree: manage tag taxonomies and render deterministic keyword exports
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a taxonomy file and report every problem
    Validate(ValidateArgs),

    /// Render the keyword string for a selection of node ids
    Export(ExportArgs),

    /// Print the taxonomy as an ordered tree
    Tree(TreeArgs),

    /// Find nodes by label or alias
    Search(SearchArgs),

    /// Rewrite sibling orders to consecutive values
    Normalize(NormalizeArgs),

    /// Create a new taxonomy file
    New(NewArgs),

    /// Add a node to a taxonomy file
    Add(AddArgs),

    /// Configuration management
    Config(ConfigArgs),
}

/// Options shared by every command that reads a taxonomy
#[derive(Args, Debug, Clone)]
pub struct TaxonomySource {
    /// Override the taxonomy file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Accept tags that have children
    #[arg(long)]
    pub allow_tag_children: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Selected node ids
    #[arg(short, long = "select", num_args = 1.., required = true)]
    pub select: Vec<String>,

    /// Separator between keywords
    #[arg(long)]
    pub separator: Option<String>,

    /// Export only the selection, without its ancestors
    #[arg(long)]
    pub no_ancestors: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Show node ids next to labels
    #[arg(long)]
    pub ids: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Text to look for
    pub query: String,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Write the result here instead of overwriting the input
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Path to write the taxonomy file
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Taxonomy name stored in meta
    #[arg(long)]
    pub name: Option<String>,

    /// Start from the built-in sample tree
    #[arg(long)]
    pub sample: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Folder,
    Tag,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub source: TaxonomySource,

    /// Label of the new node
    #[arg(long)]
    pub label: String,

    /// Node kind
    #[arg(long, value_enum, default_value = "tag")]
    pub kind: KindArg,

    /// Parent node id (omit for a root node)
    #[arg(long)]
    pub parent: Option<String>,

    /// Explicit id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Sibling order (appended after existing siblings when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub order: Option<i64>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./tagtree.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
