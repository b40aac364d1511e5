//! Process catalog
//!
//! Maps each fabrication process to the standard-cell libraries it offers and
//! its routing layers, bottom to top. The validator receives a catalog as
//! data; nothing about a specific process is compiled into the checks.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::read_document;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessInfo {
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Routing layers ordered from the lowest to the highest.
    #[serde(default)]
    pub layers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessCatalog {
    #[serde(default)]
    processes: BTreeMap<String, ProcessInfo>,
}

static BUILTIN: Lazy<ProcessCatalog> = Lazy::new(|| {
    toml::from_str(include_str!("builtin.toml")).expect("valid builtin catalog")
});

impl ProcessCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the open processes shipped with this crate.
    pub fn builtin() -> &'static ProcessCatalog {
        &BUILTIN
    }

    /// Read a catalog from a JSON, YAML, or TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = read_document(path)?;
        let catalog: ProcessCatalog = serde_json::from_value(raw)
            .with_context(|| format!("Invalid process catalog: {}", path.display()))?;

        for (id, info) in &catalog.processes {
            if info.layers.is_empty() {
                anyhow::bail!("Process '{}' in {} lists no routing layers", id, path.display());
            }
        }

        tracing::debug!(
            "loaded {} processes from catalog {}",
            catalog.processes.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn with_process(mut self, id: impl Into<String>, info: ProcessInfo) -> Self {
        self.processes.insert(id.into(), info);
        self
    }

    pub fn process(&self, id: &str) -> Option<&ProcessInfo> {
        self.processes.get(id)
    }

    pub fn process_ids(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }

    pub fn processes(&self) -> impl Iterator<Item = (&str, &ProcessInfo)> {
        self.processes.iter().map(|(id, info)| (id.as_str(), info))
    }

    pub fn allows_library(&self, process_id: &str, library: &str) -> bool {
        self.process(process_id).is_some_and(|p| p.libraries.iter().any(|l| l == library))
    }

    /// Position of `layer` in the process stack, counting from the bottom.
    pub fn layer_index(&self, process_id: &str, layer: &str) -> Option<usize> {
        self.process(process_id)?.layers.iter().position(|l| l == layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = ProcessCatalog::builtin();
        assert!(catalog.allows_library("gf180mcuD", "gf180mcu_fd_sc_mcu7t5v0"));
        assert!(!catalog.allows_library("gf180mcuD", "sky130_fd_sc_hd"));
        assert_eq!(catalog.layer_index("gf180mcuD", "Metal4"), Some(3));
        assert_eq!(catalog.layer_index("sky130A", "met5"), Some(5));
        assert_eq!(catalog.layer_index("sky130A", "Metal4"), None);
        assert!(catalog.process_ids().any(|id| id == "ihp-sg13g2"));
    }

    #[test]
    fn test_unknown_process() {
        let catalog = ProcessCatalog::builtin();
        assert!(catalog.process("nope").is_none());
        assert!(!catalog.allows_library("nope", "gf180mcu_fd_sc_mcu7t5v0"));
        assert_eq!(catalog.layer_index("nope", "Metal1"), None);
    }

    #[test]
    fn test_from_path_yaml() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("catalog.yaml");
        fs::write(
            &path,
            "processes:\n  toy1:\n    libraries: [toy_sc]\n    layers: [m1, m2, m3]\n",
        )
        .expect("write");

        let catalog = ProcessCatalog::from_path(&path).expect("catalog");
        assert!(catalog.allows_library("toy1", "toy_sc"));
        assert_eq!(catalog.layer_index("toy1", "m3"), Some(2));
    }

    #[test]
    fn test_from_path_rejects_empty_layers() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("catalog.toml");
        fs::write(&path, "[processes.toy1]\nlibraries = [\"toy_sc\"]\n").expect("write");

        let err = ProcessCatalog::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("lists no routing layers"));
    }

    #[test]
    fn test_with_process_builder() {
        let catalog = ProcessCatalog::new().with_process(
            "toy1",
            ProcessInfo { libraries: vec!["toy_sc".into()], layers: vec!["m1".into()] },
        );
        assert!(catalog.allows_library("toy1", "toy_sc"));
    }
}
