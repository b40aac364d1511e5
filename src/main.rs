//! flow-config: validate and resolve design descriptors for physical-design flows
//!
//! Reads per-design configuration files (OpenLane-style `config.json`, or the
//! YAML/TOML equivalents), checks them against a process catalog, and prints
//! diagnostics or the resolved configuration.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
