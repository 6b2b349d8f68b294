//! relief-centers: find and maintain disaster relief centers from the terminal.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use relief_cli::output::Status;
use relief_core::config::Config;
use relief_core::error::exit_codes;
use relief_core::prelude::*;
use relief_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{query, records, ClearField, Context, OutputFormat, RecordArgs};

/// Disaster relief center finder
#[derive(Parser)]
#[command(name = "relief-centers")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file holding center records (defaults to the configured data file)
    #[arg(short, long, global = true, env = "RELIEF_CENTERS_DATA")]
    data: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List active centers, closest first when a location is given
    List {
        /// Latitude of the search origin
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude of the search origin
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,

        /// Search radius in kilometers
        #[arg(short, long, allow_hyphen_values = true)]
        radius: Option<String>,

        /// Maximum number of centers
        #[arg(short, long, allow_hyphen_values = true)]
        limit: Option<String>,
    },

    /// The closest active centers to a location
    Nearest {
        /// Latitude of the search origin
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude of the search origin
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,

        /// Number of centers
        #[arg(short, long, allow_hyphen_values = true)]
        limit: Option<String>,
    },

    /// Show one center
    Show {
        /// Center id
        id: i64,
    },

    /// Register a new center
    #[command(allow_negative_numbers = true)]
    Add {
        /// Center name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Latitude in degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long)]
        lng: f64,

        #[command(flatten)]
        details: RecordArgs,
    },

    /// Change fields of an existing center
    #[command(allow_negative_numbers = true)]
    Update {
        /// Center id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New street address
        #[arg(long)]
        address: Option<String>,

        /// New latitude
        #[arg(long)]
        lat: Option<f64>,

        /// New longitude
        #[arg(long)]
        lng: Option<f64>,

        #[command(flatten)]
        details: RecordArgs,

        /// Activate or deactivate the center
        #[arg(long)]
        active: Option<bool>,

        /// Clear an optional field
        #[arg(long, value_enum)]
        clear: Vec<ClearField>,
    },

    /// Delete a center
    Remove {
        /// Center id
        id: i64,
    },

    /// Great-circle distance between two points, in kilometers
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lng1: f64,
        lat2: f64,
        lng2: f64,
    },
}

impl Commands {
    /// Message shown in place of server-side error details
    fn failure_message(&self) -> &'static str {
        match self {
            Commands::List { .. } => "Failed to fetch disaster centers",
            Commands::Nearest { .. } => "Failed to fetch nearby disaster centers",
            Commands::Show { .. } => "Failed to fetch disaster center",
            Commands::Add { .. } => "Failed to create disaster center",
            Commands::Update { .. } => "Failed to update disaster center",
            Commands::Remove { .. } => "Failed to delete disaster center",
            Commands::Distance { .. } => "Failed to calculate distance",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.schema.logging.clone())
        .unwrap_or_default();
    let telemetry = TelemetryConfig {
        log_level: logging.level,
        json: logging.json,
        ..TelemetryConfig::default()
    }
    .with_verbosity(cli.verbose);
    if let Err(e) = relief_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
    // Loaded before the subscriber existed, so the loader's own event was dropped.
    if let Ok(config) = &config {
        tracing::debug!(path = ?config.path, "Configuration loaded");
    }

    let failure_message = cli.command.failure_message();
    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(cli.command, cli.data, cli.format, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let core = e.downcast_ref::<relief_core::Error>();
            if let Some(err) = core {
                tracing::debug!(code = %err.code, category = err.code.category(), "Command failed");
            }
            if cli.format == OutputFormat::Json {
                let fallback = relief_core::Error::internal(e.to_string());
                let response = ApiResponse::<()>::from_error(core.unwrap_or(&fallback), failure_message);
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{}", json),
                    Err(_) => Status::error(&e.to_string()),
                }
            } else {
                Status::error(&e.to_string());
            }
            let code = core.map_or(exit_codes::FAILURE, relief_core::Error::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(command: Commands, data: Option<PathBuf>, format: OutputFormat, config: Config) -> anyhow::Result<()> {
    let data = data.unwrap_or_else(|| PathBuf::from(&config.schema.store.data_file));
    let ctx = Context::new(JsonFileStore::new(data), config.schema.query, format);

    match command {
        Commands::List { lat, lng, radius, limit } => {
            query::list(&ctx, lat.as_deref(), lng.as_deref(), radius.as_deref(), limit.as_deref())
        }
        Commands::Nearest { lat, lng, limit } => {
            query::nearest(&ctx, lat.as_deref(), lng.as_deref(), limit.as_deref())
        }
        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            query::distance(&ctx, Coordinate::new(lat1, lng1), Coordinate::new(lat2, lng2))
        }
        Commands::Show { id } => records::show(&ctx, id),
        Commands::Add { name, address, lat, lng, details } => {
            records::add(&ctx, details.into_new_center(name, address, lat, lng))
        }
        Commands::Update { id, name, address, lat, lng, details, active, clear } => {
            let patch = details.into_patch(name, address, lat, lng, active, &clear);
            records::update(&ctx, id, patch)
        }
        Commands::Remove { id } => records::remove(&ctx, id),
    }
}
