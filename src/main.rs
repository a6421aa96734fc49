//! Binary entry point for placebook.
//!
//! This binary provides the CLI host for the placebook record store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use placebook::cli::{self, OutputFormat, RecordInput};
use placebook::config::PlacebookConfig;
use placebook::device::{Coordinates, PrintShare};
use placebook::observability;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Placebook - a personal contact and location book.
#[derive(Parser)]
#[command(name = "placebook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "PLACEBOOK_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Add a record.
    Add {
        /// Display name.
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing record.
    Edit {
        /// Record id or unique id prefix.
        id: String,

        /// New display name.
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove a record.
    Remove {
        /// Record id or unique id prefix.
        id: String,
    },

    /// List all records.
    List {
        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show one record.
    Show {
        /// Record id or unique id prefix.
        id: String,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Export all records to a CSV file.
    Export {
        /// Directory to write to (default: configured export directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import records from a CSV file.
    Import {
        /// CSV file to read.
        file: PathBuf,
    },
}

/// Optional record fields shared by `add` and `edit`.
#[derive(Args)]
struct FieldArgs {
    /// Location reference (URL or free text).
    #[arg(short, long)]
    location: Option<String>,

    /// Latitude; with --lon, sets the location to a maps link.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude; with --lat, sets the location to a maps link.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Mobile number.
    #[arg(short, long)]
    mobile: Option<String>,

    /// Email address.
    #[arg(short, long)]
    email: Option<String>,

    /// Postal address.
    #[arg(short, long)]
    address: Option<String>,

    /// Free-text description.
    #[arg(short, long)]
    description: Option<String>,

    /// Image file to attach.
    #[arg(short, long)]
    photo: Option<PathBuf>,
}

impl FieldArgs {
    fn into_input(self, name: Option<String>) -> placebook::Result<RecordInput> {
        let coordinates = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
            _ => None,
        };

        Ok(RecordInput {
            name,
            location: self.location,
            coordinates,
            mobile: self.mobile,
            email: self.email,
            address: self.address,
            description: self.description,
            photo: self.photo,
        })
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run_command(command: Commands, config: &PlacebookConfig) -> placebook::Result<()> {
    let mut store = cli::open_store(config)?;
    let mut out = io::stdout().lock();

    match command {
        Commands::Add { name, fields } => {
            cli::cmd_add(&mut store, fields.into_input(Some(name))?, &mut out).map(|_| ())
        },
        Commands::Edit { id, name, fields } => {
            cli::cmd_edit(&mut store, &id, fields.into_input(name)?, &mut out).map(|_| ())
        },
        Commands::Remove { id } => cli::cmd_remove(&mut store, &id, &mut out).map(|_| ()),
        Commands::List { format } => cli::cmd_list(&store, OutputFormat::parse(&format), &mut out),
        Commands::Show { id, format } => {
            cli::cmd_show(&store, &id, OutputFormat::parse(&format), &mut out)
        },
        Commands::Export { output } => {
            let export_dir = output.unwrap_or_else(|| config.resolved_export_dir());
            cli::cmd_export(&store, &export_dir, &PrintShare, &mut out).map(|_| ())
        },
        Commands::Import { file } => cli::cmd_import(&mut store, &file, &mut out).map(|_| ()),
    }
}

/// Loads configuration from an explicit path or the default location, then
/// applies environment overrides.
fn load_config(path: Option<&Path>) -> placebook::Result<PlacebookConfig> {
    let mut config = match path {
        Some(path) => PlacebookConfig::load_from_file(path)?,
        None => PlacebookConfig::load_default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}
