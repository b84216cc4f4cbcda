//! Location hierarchy CLI
//!
//! Reverse-geocode the placemarks of a KML document into a CSV report.
//! Running without arguments uses the configured (or default) paths.

use anyhow::{Context, Result};
use clap::Parser;
use location_hierarchy::{pipeline, Config, ConfigLayer, OpenCageClient};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "location-hierarchy")]
#[command(about = "Reverse-geocode KML placemarks into a location hierarchy CSV")]
#[command(version)]
struct Args {
    /// Input KML or KMZ file (default: Fornecimento_CAMTAUA.kml)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV file (default: location_hierarchy.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of ./.location-hierarchy.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Geocoding endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Response language hint (default: pt)
    #[arg(long)]
    language: Option<String>,

    /// Country-code hint (default: br)
    #[arg(long)]
    country_code: Option<String>,
}

impl Args {
    /// Command-line configuration layer. The API key is never taken from argv.
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            api_key: None,
            input: self.input.clone(),
            output: self.output.clone(),
            endpoint: self.endpoint.clone(),
            language: self.language.clone(),
            country_code: self.country_code.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "location_hierarchy=info"
                    .parse()
                    .expect("directive is compile-time constant"),
            ),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref(), args.layer())
        .context("Invalid configuration")?;
    let client = OpenCageClient::from_config(&config);

    match pipeline::run(&config, &client).await {
        Ok(summary) => {
            info!(
                "Resolved {} of {} coordinates ({} skipped)",
                summary.resolved, summary.coordinates, summary.skipped
            );
        }
        Err(e) if e.is_fatal() => return Err(e.into()),
        // Read, parse and write failures end the run without a failing exit status
        Err(e) => error!("Error processing data: {}", e),
    }

    Ok(())
}
