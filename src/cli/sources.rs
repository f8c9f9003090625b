//! Sources command implementation

use anyhow::Result;
use clap::Args;
use superset_config::assemble::assemble_with_sources;
use superset_config::MergeStrategyTable;

use super::utils::{source_context, SourceArgs};

#[derive(Args)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: SourcesArgs) -> Result<()> {
    let ctx = source_context(&args.source)?;
    let assembly = assemble_with_sources(&ctx, &MergeStrategyTable::default())?;

    println!("Default:  {}", assembly.default.describe());
    println!("Override: {}", assembly.overrides.describe());
    println!("Keys:     {}", assembly.config.len());
    if !ctx.importer().search_path().is_empty() {
        println!("Search path:");
        for dir in ctx.importer().search_path() {
            println!("  {}", dir.display());
        }
    }
    Ok(())
}
