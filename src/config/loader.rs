//! Descriptor file loading

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::ProcessCatalog;
use crate::domain::DesignConfiguration;
use crate::validate::{load, LoadOptions};

/// Read a JSON, YAML, or TOML file into a generic document tree.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading config file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON syntax: {}", path.display())),
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML syntax: {}", path.display())),
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML syntax: {}", path.display())),
        other => {
            anyhow::bail!("Unsupported config extension '.{}' for file {}", other, path.display())
        }
    }
}

/// Read and validate a descriptor, resolving `dir::` references against the
/// file's own directory.
///
/// Validation failures keep their [`crate::Diagnostics`] batch, reachable
/// through `downcast_ref` on the returned error.
pub fn load_file(
    path: &Path,
    catalog: &ProcessCatalog,
    options: &LoadOptions,
) -> Result<DesignConfiguration> {
    let document = read_document(path)?;
    let base_directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    tracing::debug!("loading {} with base {}", path.display(), base_directory.display());

    load(&document, &base_directory, catalog, options)
        .with_context(|| format!("Invalid configuration: {}", path.display()))
}

/// Find the descriptor inside a design directory.
pub fn discover_config(design_dir: &Path) -> Option<PathBuf> {
    let candidates = ["config.json", "config.yaml", "config.yml", "config.toml"];

    for candidate in candidates {
        let path = design_dir.join(candidate);
        if path.is_file() {
            return Some(path);
        }
    }

    None
}
