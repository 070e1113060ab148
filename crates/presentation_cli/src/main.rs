//! NextRide CLI
//!
//! Finds the MBTA stop nearest to a location and the soonest departure from
//! it in an allowed direction.

#![allow(clippy::print_stdout)]

mod prompt;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use application::LeaveNowService;
use clap::{Args, Parser, Subcommand};
use domain::GeoLocation;
use infrastructure::{AppConfig, MbtaTransitAdapter};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::prompt::{LATITUDE_PROMPT, LONGITUDE_PROMPT, read_coordinate};

/// NextRide CLI
#[derive(Parser)]
#[command(name = "nextride")]
#[command(author, version, about = "Nearest MBTA stop and soonest departure", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "NEXTRIDE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Query location; missing coordinates are prompted for
#[derive(Args, Debug, Clone, Copy)]
struct LocationArgs {
    /// Latitude in degrees (ex: 42.308216)
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Longitude in degrees (ex: -71.072487)
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the soonest allowed departure from the nearest stop
    ///
    /// Example: nextride leave-now --latitude 42.352271 --longitude -71.055242
    LeaveNow {
        #[command(flatten)]
        location: LocationArgs,

        /// Print the resolved stop and skipped records along with the result
        #[arg(long)]
        report: bool,
    },

    /// Show the stop nearest to a location
    NearestStop {
        #[command(flatten)]
        location: LocationArgs,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8, json: bool) {
    let filter = EnvFilter::new(log_filter_from_verbosity(verbose));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(io::stderr)))
        .init();
}

/// Use the given coordinates, prompting on the terminal for missing ones
///
/// Prompts go to stderr so stdout carries only the JSON result.
fn resolve_location(args: LocationArgs) -> anyhow::Result<GeoLocation> {
    prompt_missing(args, &mut io::stdin().lock(), &mut io::stderr())
}

fn prompt_missing<R: BufRead, W: Write>(
    args: LocationArgs,
    input: &mut R,
    prompts: &mut W,
) -> anyhow::Result<GeoLocation> {
    let latitude = match args.latitude {
        Some(value) => value,
        None => read_coordinate(input, prompts, LATITUDE_PROMPT)?,
    };
    let longitude = match args.longitude {
        Some(value) => value,
        None => read_coordinate(input, prompts, LONGITUDE_PROMPT)?,
    };

    Ok(GeoLocation::new(latitude, longitude))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };

    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

fn build_service(config: &AppConfig) -> anyhow::Result<LeaveNowService> {
    let adapter = MbtaTransitAdapter::from_config(&config.mbta)?;

    Ok(LeaveNowService::new(Arc::new(adapter))
        .with_allowed_directions(config.allowed_directions.clone())
        .with_search_radius(config.mbta.search_radius))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let config = load_config(cli.config.as_ref())?;
    let service = build_service(&config)?;

    match cli.command {
        Commands::LeaveNow { location, report } => {
            let location = resolve_location(location)?;
            info!(%location, "Looking up soonest departure");

            let outcome = service.leave_now(&location).await?;
            info!(
                departure = outcome.result.is_departure(),
                skipped = outcome.skipped.len(),
                "Lookup finished"
            );
            if report {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            }
        },

        Commands::NearestStop { location } => {
            let location = resolve_location(location)?;
            let stop = service.nearest_stop(&location).await?;

            info!(skipped = stop.skipped_count(), "Nearest stop resolved");
            println!("{}", serde_json::to_string_pretty(&stop.value)?);
        },
    }

    Ok(())
}
