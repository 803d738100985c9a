//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tagtree_domain::{ImportOptions, SCHEMA_VERSION, ValidateOptions};
use tagtree_domain::usecases::RenderConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_taxonomy_path")]
    pub taxonomy_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_true")]
    pub include_ancestors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub enforce_leaf_rule: bool,

    #[serde(default = "default_schema_version")]
    pub schema_version: String,
}

// Default value functions
fn default_taxonomy_path() -> PathBuf {
    PathBuf::from("./taxonomy.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_separator() -> String {
    ", ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: default_taxonomy_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            include_ancestors: default_true(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_leaf_rule: false,
            schema_version: default_schema_version(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./tagtree.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TAGTREE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validation options, with the CLI flag able to relax the leaf rule
    pub fn validate_options(&self, allow_tag_children: bool) -> ValidateOptions {
        ValidateOptions {
            expected_version: self.validation.schema_version.clone(),
            enforce_leaf_rule: self.validation.enforce_leaf_rule && !allow_tag_children,
        }
    }

    pub fn import_options(&self, allow_tag_children: bool) -> ImportOptions {
        ImportOptions {
            validation: self.validate_options(allow_tag_children),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            separator: self.export.separator.clone(),
            include_ancestors: self.export.include_ancestors,
        }
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# tagtree configuration

[general]
taxonomy_path = "./taxonomy.json"
log_level = "info"

[export]
# Joins exported keywords; labels never contain commas
separator = ", "
include_ancestors = true

[validation]
# Reject tags that have children
enforce_leaf_rule = false
schema_version = "1.0.0"
"#
        .to_string()
    }
}
