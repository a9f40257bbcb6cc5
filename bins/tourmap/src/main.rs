//! Tourmap CLI - nearby tourist destinations in the terminal
//!
//! A textual stand-in for the dashboard page: lists destinations from the
//! local cache, refreshes them from the backend, and filters them by
//! distance, category, search text or bookmarks.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tourmap_search::ViewMode;

mod commands;
mod context;
mod output;

use commands::{categories, check, distance, list, locate, refresh, saved, watch};

/// Nearby tourist destinations
#[derive(Parser)]
#[command(name = "tourmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, allow_negative_numbers = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (tourmap.toml in the current directory by default)
    #[arg(short, long, global = true, env = "TOURMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the cache and saved destinations
    #[arg(long, global = true, env = "TOURMAP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// List filters shared by `list` and `watch`
#[derive(Debug, Clone, clap::Args)]
pub struct FilterArgs {
    /// Which destinations to start from
    #[arg(long, value_enum, default_value_t = ViewArg::All)]
    view: ViewArg,

    /// Category id or name
    #[arg(long)]
    category: Option<String>,

    /// Text matched against name, category, description and address
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    All,
    Nearby,
    Saved,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::All => ViewMode::All,
            ViewArg::Nearby => ViewMode::Nearby,
            ViewArg::Saved => ViewMode::Saved,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List destinations from the cache, refreshing stale data
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Current position as LAT,LON
        #[arg(long, value_parser = context::parse_point)]
        near: Option<tourmap_geo::ReferencePoint>,

        /// Nearby radius in kilometers (overrides the configuration)
        #[arg(long)]
        radius: Option<f64>,

        /// Use cached data only
        #[arg(long)]
        offline: bool,
    },

    /// Fetch destinations and categories from the backend
    Refresh,

    /// List destination categories
    Categories {
        /// Use cached data only
        #[arg(long)]
        offline: bool,
    },

    /// Save a destination, or unsave it if already saved
    Save {
        /// Destination id
        id: String,

        /// Use cached data only
        #[arg(long)]
        offline: bool,
    },

    /// List saved destinations
    Saved,

    /// Look up the address of a coordinate
    #[command(allow_negative_numbers = true)]
    Locate {
        latitude: f64,
        longitude: f64,
    },

    /// Great-circle distance between two coordinates
    #[command(allow_negative_numbers = true)]
    Distance {
        from_latitude: f64,
        from_longitude: f64,
        to_latitude: f64,
        to_longitude: f64,
    },

    /// Validate a destination draft (JSON) before submitting it
    Check {
        /// Draft file with name, category_id, latitude, longitude and optional address fields
        draft: PathBuf,
    },

    /// Follow a recorded track and show what is nearby at each position
    Watch {
        /// Position file: one `LAT, LON[, ACCURACY]` or `denied` / `unavailable` / `timeout` per line
        #[arg(long)]
        replay: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Milliseconds between positions (overrides the configured poll interval)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Use cached data only
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = tourmap_telemetry::TelemetryConfig::default()
        .with_verbosity(cli.verbose)
        .with_format(match cli.format {
            OutputFormat::Text => tourmap_telemetry::LogFormat::Compact,
            OutputFormat::Json => tourmap_telemetry::LogFormat::Json,
        });
    let _guard = match tourmap_telemetry::init_with_config(telemetry) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            None
        }
    };

    let settings = context::Settings {
        config: cli.config,
        data_dir: cli.data_dir,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::List {
            filters,
            near,
            radius,
            offline,
        } => list::run(&settings, &filters, near, radius, offline).await,
        Commands::Refresh => refresh::run(&settings).await,
        Commands::Categories { offline } => categories::run(&settings, offline).await,
        Commands::Save { id, offline } => saved::toggle(&settings, &id, offline).await,
        Commands::Saved => saved::list(&settings),
        Commands::Locate { latitude, longitude } => locate::run(&settings, latitude, longitude).await,
        Commands::Distance {
            from_latitude,
            from_longitude,
            to_latitude,
            to_longitude,
        } => distance::run(
            settings.format,
            (from_latitude, from_longitude),
            (to_latitude, to_longitude),
        ),
        Commands::Check { draft } => check::run(settings.format, &draft),
        Commands::Watch {
            replay,
            filters,
            interval_ms,
            offline,
        } => watch::run(&settings, &replay, &filters, interval_ms, offline).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
