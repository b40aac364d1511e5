//! Document reading and loader settings
//!
//! Reads design descriptors from JSON, YAML, or TOML files and layers the
//! loader's own settings (defaults < settings file < environment < CLI).

pub mod loader;
pub mod settings;

pub use loader::{discover_config, load_file, read_document};
pub use settings::LoaderSettings;
