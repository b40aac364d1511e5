//! Resolve command implementation

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::utils::{locate_config, LoaderArgs};
use flow_config::config::load_file;

#[derive(Args)]
pub struct ResolveArgs {
    /// Descriptor file or design directory
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    #[command(flatten)]
    pub loader: LoaderArgs,
}

pub fn run(args: ResolveArgs, settings_file: Option<&Path>) -> Result<()> {
    let settings = args.loader.settings(settings_file)?;
    let catalog = settings.catalog()?;
    let path = locate_config(&args.config)?;

    let config = load_file(&path, &catalog, &settings.options())?;

    let output = json!({
        "fingerprint": config.fingerprint()?,
        "config": config.to_json()?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
