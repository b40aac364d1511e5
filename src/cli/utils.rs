//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use flow_config::config::{discover_config, LoaderSettings};
use flow_config::UnknownKeyPolicy;

/// Flags that override the loader settings.
#[derive(Args, Debug, Clone, Default)]
pub struct LoaderArgs {
    /// Reject unrecognized keys
    #[arg(long, conflicts_with = "permissive")]
    pub strict: bool,

    /// Keep unrecognized keys as extension data
    #[arg(long)]
    pub permissive: bool,

    /// Process catalog file (JSON, YAML, or TOML)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

impl LoaderArgs {
    /// Layered settings with these flags applied on top.
    pub fn settings(&self, settings_file: Option<&Path>) -> Result<LoaderSettings> {
        let mut settings = LoaderSettings::load(settings_file)?;
        if self.strict {
            settings.unknown_keys = UnknownKeyPolicy::Strict;
        }
        if self.permissive {
            settings.unknown_keys = UnknownKeyPolicy::Permissive;
        }
        if let Some(catalog) = &self.catalog {
            settings.catalog = Some(catalog.clone());
        }
        Ok(settings)
    }
}

/// Accept either a descriptor file or a design directory containing one.
pub fn locate_config(path: &Path) -> Result<PathBuf> {
    let path = if path.is_dir() {
        discover_config(path)
            .with_context(|| format!("No config.json/yaml/toml found in {}", path.display()))?
    } else {
        path.to_path_buf()
    };
    path.canonicalize().with_context(|| format!("Config file not found: {}", path.display()))
}
