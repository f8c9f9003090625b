//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use superset_config::{assemble, MergeStrategyTable};

use super::utils::{source_context, SourceArgs};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print only the value at this dotted path (e.g. CACHE_CONFIG.CACHE_TYPE)
    #[arg(short, long, value_name = "PATH")]
    pub key: Option<String>,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let ctx = source_context(&args.source)?;
    let config = assemble(&ctx, &MergeStrategyTable::default())?;

    let rendered = match &args.key {
        Some(path) => {
            let value = config
                .get_path(path)
                .with_context(|| format!("No configuration value at '{}'", path))?;
            render(value, args.format)?
        }
        None => render(&config, args.format)?,
    };
    print!("{}", rendered);
    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}
