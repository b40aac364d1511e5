//! Catalog command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use flow_config::config::LoaderSettings;

#[derive(Args)]
pub struct CatalogArgs {
    /// Process catalog file (defaults to the configured or built-in catalog)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: CatalogArgs, settings_file: Option<&Path>) -> Result<()> {
    let mut settings = LoaderSettings::load(settings_file)?;
    if args.catalog.is_some() {
        settings.catalog = args.catalog;
    }
    let catalog = settings.catalog()?;

    for (id, info) in catalog.processes() {
        println!("{}", style(id).bold());
        println!("  libraries: {}", info.libraries.join(", "));
        println!("  layers:    {}", info.layers.join(" < "));
    }
    Ok(())
}
