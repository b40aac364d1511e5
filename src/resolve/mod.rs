//! Reference resolution and deferred existence checks
//!
//! The loader only rewrites `dir::` references into paths; it never touches
//! the filesystem. Checking that the referenced files exist belongs to the
//! flow engine's execution phase, see [`find_dangling_references`].

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::keys;
use crate::domain::DesignConfiguration;
use crate::utils::lexical_join;

/// Prefix marking a path relative to the document's directory.
pub const DIR_MARKER: &str = "dir::";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ResolveError {
    pub reason: String,
}

/// Turns a path-typed document string into a concrete path.
pub trait PathResolver {
    fn resolve(&self, base_directory: &Path, value: &str) -> Result<PathBuf, ResolveError>;
}

/// Lexical resolver for `dir::` references; unmarked strings are literal paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerResolver;

impl PathResolver for MarkerResolver {
    fn resolve(&self, base_directory: &Path, value: &str) -> Result<PathBuf, ResolveError> {
        match value.strip_prefix(DIR_MARKER) {
            Some(fragment) => {
                let resolved = lexical_join(base_directory, fragment)
                    .map_err(|e| ResolveError { reason: e.to_string() })?;
                tracing::debug!("resolved {} -> {}", value, resolved.display());
                Ok(resolved)
            }
            None => Ok(PathBuf::from(value)),
        }
    }
}

/// Existence check used by the flow engine before it runs.
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// A resolved path that does not point at an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub field: &'static str,
    pub path: PathBuf,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: file not found: {}", self.field, self.path.display())
    }
}

/// List every referenced file the probe cannot find, sources first.
pub fn find_dangling_references(
    config: &DesignConfiguration,
    probe: &dyn FileProbe,
) -> Vec<DanglingReference> {
    let sources = config.source_files().iter().map(|path| (keys::VERILOG_FILES, path.as_path()));
    let pin_order = config.pin_order_reference().map(|path| (keys::FP_PIN_ORDER_CFG, path));

    sources
        .chain(pin_order)
        .filter(|(_, path)| !probe.exists(path))
        .map(|(field, path)| DanglingReference { field, path: path.to_path_buf() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_resolver_relative() {
        let resolved = MarkerResolver
            .resolve(Path::new("/flows/x/y"), "dir::../../rtl/top.sv")
            .expect("resolve");
        assert_eq!(resolved, PathBuf::from("/flows/rtl/top.sv"));
    }

    #[test]
    fn test_marker_resolver_literal_passthrough() {
        let resolved =
            MarkerResolver.resolve(Path::new("/flows"), "/pdk/cells/top.v").expect("resolve");
        assert_eq!(resolved, PathBuf::from("/pdk/cells/top.v"));
    }

    #[test]
    fn test_marker_resolver_reports_reason() {
        let err = MarkerResolver.resolve(Path::new("/flows"), "dir::").unwrap_err();
        assert_eq!(err.reason, "reference has no path after the marker");
    }
}
