mod columns;
mod dataset;
mod export;
mod find;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "meetfinder")]
#[command(about = "Find licensed athletics competitions near a postcode")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find competitions within a radius of a postcode, nearest first
    Find {
        /// Origin postcode (defaults to MEETFINDER_HOME_POSTCODE)
        #[arg(long, short)]
        postcode: Option<String>,
        /// Maximum distance in miles
        #[arg(long, short)]
        radius: f64,
        /// Dataset file (defaults to the newest file in the data directory)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Write matches to this CSV file
        #[arg(long, conflicts_with = "save")]
        output: Option<PathBuf>,
        /// Write matches to competitions_near_<postcode>_within_<radius>miles.csv
        #[arg(long)]
        save: bool,
    },
    /// Show which dataset columns were picked for each field
    Columns {
        /// Dataset file (defaults to the newest file in the data directory)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Resolve a single postcode to coordinates
    Lookup {
        postcode: String,
    },
    /// List dataset files in the data directory, newest first
    Datasets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = meetfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Find {
            postcode,
            radius,
            data,
            output,
            save,
        } => {
            let output = match (save, output) {
                (true, _) => find::OutputTarget::Default,
                (false, Some(path)) => find::OutputTarget::Path(path),
                (false, None) => find::OutputTarget::None,
            };
            find::run_find(&config, postcode.as_deref(), radius, data.as_deref(), output).await
        }
        Commands::Columns { data } => columns::run_columns(&config, data.as_deref()),
        Commands::Lookup { postcode } => find::run_lookup(&config, &postcode).await,
        Commands::Datasets => dataset::run_datasets(&config),
    }
}

#[cfg(test)]
mod tests;
