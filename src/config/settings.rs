//! Loader settings
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. Settings file (`flow-config.toml` in the working directory, or an explicit path)
//! 3. Environment variables (`FLOW_CONFIG_*`)
//! 4. CLI flags, applied by the caller

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::ProcessCatalog;
use crate::validate::{LoadOptions, UnknownKeyPolicy};

pub const SETTINGS_FILE: &str = "flow-config.toml";
pub const ENV_PREFIX: &str = "FLOW_CONFIG_";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// What to do with keys the loader does not recognize.
    #[serde(default)]
    pub unknown_keys: UnknownKeyPolicy,

    /// Process catalog file; the built-in catalog is used when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl LoaderSettings {
    pub fn figment(settings_file: Option<&Path>) -> Figment {
        let file = settings_file.map(Path::to_path_buf).unwrap_or_else(|| SETTINGS_FILE.into());
        let is_yaml = matches!(
            file.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let figment = Figment::new().merge(Serialized::defaults(LoaderSettings::default()));
        let figment =
            if is_yaml { figment.merge(Yaml::file(&file)) } else { figment.merge(Toml::file(&file)) };
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(settings_file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(settings_file))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: LoaderSettings =
            figment.extract().context("Failed to extract loader settings")?;
        tracing::debug!("loader settings: {:?}", settings);
        Ok(settings)
    }

    pub fn options(&self) -> LoadOptions {
        LoadOptions { unknown_keys: self.unknown_keys }
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<ProcessCatalog> {
        match &self.catalog {
            Some(path) => ProcessCatalog::from_path(path),
            None => Ok(ProcessCatalog::builtin().clone()),
        }
    }
}
