//! Command-line interface for flow-config
//!
//! Provides `check`, `resolve`, `catalog`, and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod catalog;
mod check;
mod resolve;
mod utils;

/// Validate and resolve design descriptors for physical-design flows
#[derive(Parser)]
#[command(name = "flow-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Loader settings file (defaults to ./flow-config.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more design descriptors
    Check(check::CheckArgs),

    /// Print the resolved configuration of a design descriptor as JSON
    Resolve(resolve::ResolveArgs),

    /// List the processes, libraries, and routing layers of the catalog
    Catalog(catalog::CatalogArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let settings = cli.settings.as_deref();
    match cli.command {
        Commands::Check(args) => check::run(args, settings),
        Commands::Resolve(args) => resolve::run(args, settings),
        Commands::Catalog(args) => catalog::run(args, settings),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "flow-config",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
