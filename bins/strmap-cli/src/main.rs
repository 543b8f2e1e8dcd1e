mod error;

use std::path::PathBuf;

use clap::Parser;
use strmap_config_hcl::HclParser;
use strmap_engine::{EngineError, Mapper, NULL_TEXT, TomlParser, TypeTable, TypeTableConfig};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "strmap", about = "Map text to a typed value")]
struct Cli {
    /// Type table to load (.toml or .hcl).
    #[arg(long, env = "STRMAP_TYPES")]
    types: Option<PathBuf>,

    /// Target type: a primitive (`int`), boxed (`Integer`, `String`) or
    /// declared type name.
    #[arg(long = "type", default_value = "String")]
    ty: String,

    /// Map text to enum cases by name.
    #[arg(long)]
    enum_mapping: bool,

    /// Print the value as JSON.
    #[arg(long)]
    json: bool,

    /// Text to map. Omitted text is treated as absent.
    text: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "mapping failed");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = match &cli.types {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading type table");
            TypeTableConfig::load_with(path, &[&TomlParser, &HclParser])?
        }
        None => TypeTableConfig::default(),
    };
    let table = TypeTable::from_config(&config)?;
    let ty = table.resolve(&cli.ty)?;

    let mut mapper = Mapper::new();
    if cli.enum_mapping || config.enum_mapping {
        mapper.enable_enum_mapping();
    }

    let value = mapper
        .map_opt(cli.text.as_deref(), &ty)
        .map_err(EngineError::from)?;
    if cli.json {
        return Ok(serde_json::to_string(&value)?);
    }
    Ok(value.map_or_else(|| NULL_TEXT.to_string(), |v| v.to_string()))
}
