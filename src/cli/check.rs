//! Check command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use rayon::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::utils::{locate_config, LoaderArgs};
use flow_config::config::load_file;
use flow_config::{
    find_dangling_references, DanglingReference, DesignConfiguration, Diagnostics, FsProbe,
    LoadOptions, ProcessCatalog,
};

#[derive(Args)]
pub struct CheckArgs {
    /// Descriptor files or design directories
    #[arg(value_name = "CONFIG", required = true)]
    pub configs: Vec<PathBuf>,

    #[command(flatten)]
    pub loader: LoaderArgs,

    /// Also check that every referenced file exists
    #[arg(long)]
    pub verify_files: bool,

    /// Emit results as JSON lines
    #[arg(long)]
    pub json: bool,
}

enum Outcome {
    Valid { config: Box<DesignConfiguration>, dangling: Vec<DanglingReference> },
    Invalid(Diagnostics),
    Failed(anyhow::Error),
}

impl Outcome {
    fn passed(&self) -> bool {
        matches!(self, Outcome::Valid { dangling, .. } if dangling.is_empty())
    }
}

pub fn run(args: CheckArgs, settings_file: Option<&Path>) -> Result<()> {
    let settings = args.loader.settings(settings_file)?;
    let catalog = settings.catalog()?;
    let options = settings.options();

    // Loads are independent; results are reported in argument order.
    let outcomes: Vec<(PathBuf, Outcome)> = args
        .configs
        .par_iter()
        .map(|path| (path.clone(), check_one(path, &catalog, &options, args.verify_files)))
        .collect();

    for (path, outcome) in &outcomes {
        if args.json {
            println!("{}", outcome_json(path, outcome)?);
        } else {
            print_outcome(path, outcome);
        }
    }

    let failed = outcomes.iter().filter(|(_, outcome)| !outcome.passed()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} configurations failed validation", failed, outcomes.len());
    }
    Ok(())
}

fn check_one(
    path: &Path,
    catalog: &ProcessCatalog,
    options: &LoadOptions,
    verify_files: bool,
) -> Outcome {
    let loaded = locate_config(path).and_then(|file| load_file(&file, catalog, options));
    match loaded {
        Ok(config) => {
            let dangling =
                if verify_files { find_dangling_references(&config, &FsProbe) } else { Vec::new() };
            Outcome::Valid { config: Box::new(config), dangling }
        }
        Err(err) => match err.downcast_ref::<Diagnostics>() {
            Some(diags) => Outcome::Invalid(diags.clone()),
            None => Outcome::Failed(err),
        },
    }
}

fn print_outcome(path: &Path, outcome: &Outcome) {
    match outcome {
        Outcome::Valid { config, dangling } if dangling.is_empty() => {
            println!("{} {} ({})", style("ok").green().bold(), config.design_name(), path.display());
        }
        Outcome::Valid { config, dangling } => {
            println!(
                "{} {} ({})",
                style("missing files").red().bold(),
                config.design_name(),
                path.display()
            );
            for reference in dangling {
                println!("  {reference}");
            }
        }
        Outcome::Invalid(diags) => {
            println!("{} {}", style("invalid").red().bold(), path.display());
            for error in diags {
                println!("  [{}] {}", style(error.kind()).yellow(), error);
            }
        }
        Outcome::Failed(err) => {
            println!("{} {}: {:#}", style("error").red().bold(), path.display(), err);
        }
    }
}

fn outcome_json(path: &Path, outcome: &Outcome) -> Result<serde_json::Value> {
    let path = path.display().to_string();
    let value = match outcome {
        Outcome::Valid { config, dangling } => {
            let status = if dangling.is_empty() { "ok" } else { "missing_files" };
            json!({
                "path": path,
                "status": status,
                "design": config.design_name(),
                "fingerprint": config.fingerprint()?,
                "missing_files": dangling,
            })
        }
        Outcome::Invalid(diags) => json!({
            "path": path,
            "status": "invalid",
            "errors": diags.errors(),
        }),
        Outcome::Failed(err) => json!({
            "path": path,
            "status": "error",
            "message": format!("{err:#}"),
        }),
    };
    Ok(value)
}
