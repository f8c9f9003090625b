//! superset-config: inspect the layered application configuration
//!
//! Assembles the effective configuration the way the server does at boot and
//! prints it, or reports where the default and override sources came from.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
