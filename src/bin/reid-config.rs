use clap::{Parser, Subcommand};
use reid_config::{
    config::{
        load_service_config_from_file, load_tree_from_file, validate_config, ServiceConfig,
        TrackerConfig,
    },
    Error,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read the file as a bare attribute tree instead of a service envelope
    #[arg(long, global = true)]
    attributes_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and print the typed configuration
    Validate {
        file: PathBuf,

        /// Report the first error of every failing section
        #[arg(long)]
        collect: bool,
    },

    /// Print the resources a configuration depends on
    Deps { file: PathBuf },
}

fn load(path: &Path, attributes_only: bool) -> Result<ServiceConfig, Error> {
    let config = if attributes_only {
        ServiceConfig::new("", load_tree_from_file(path)?)
    } else {
        load_service_config_from_file(path)?
    };
    debug!(name = %config.name, "configuration loaded");
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value).map_err(reid_config::config::LoadError::from)?;
    println!("{}", json);
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Validate { file, collect } => {
            let config = load(file, cli.attributes_only)?;
            let tracker = if *collect {
                let report = TrackerConfig::validate_collecting(&config.attributes);
                for error in report.errors() {
                    eprintln!("{}", error);
                }
                report.into_result()?
            } else {
                TrackerConfig::from_tree(&config.attributes)?
            };
            info!(file = %file.display(), "configuration is valid");
            print_json(&tracker)
        }
        Commands::Deps { file } => {
            let config = load(file, cli.attributes_only)?;
            for dependency in validate_config(&config)? {
                println!("{}", dependency);
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
