use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use olympics_loader::{Loader, LoaderConfig};

#[derive(Parser)]
#[command(name = "olympics-loader")]
#[command(about = "Load a directory of Olympic CSV exports into a SQLite database")]
#[command(version = "0.1.0")]
#[command(long_about = "Reads the expected top-level CSV files (athletes, coaches, events, medallists, medals, nocs, schedules, teams, venues) and every CSV file in the results/ subdirectory, writes each one as a table of a freshly created SQLite database, then prints the row count of every table.")]
#[command(after_help = "EXAMPLES:
    # Load data/olympics into olympics.db
    olympics-loader

    # Load another export into a custom database file
    olympics-loader --source-dir exports/paris --database paris.db

    # Print the run report as JSON after the summary
    olympics-loader --format json")]
struct Cli {
    /// Directory containing the CSV files
    #[arg(short, long, value_name = "DIR", default_value = "data/olympics")]
    source_dir: PathBuf,

    /// SQLite database file, recreated on every run
    #[arg(short, long, value_name = "FILE", default_value = "olympics.db")]
    database: PathBuf,

    /// Output format for the run report
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Set log level explicitly
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    info!("Starting olympics-loader v{}", env!("CARGO_PKG_VERSION"));

    let config = LoaderConfig::default()
        .with_source_dir(cli.source_dir)
        .with_database_path(cli.database);
    let loader = Loader::new(config);

    match loader.run() {
        Ok(report) => {
            info!("Summary: {}", report.summary());
            if let OutputFormat::Json = cli.format {
                println!("{}", report.to_json()?);
            }
        }
        Err(e) => {
            eprintln!("Import failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging based on CLI configuration
fn initialize_logging(cli: &Cli) -> Result<()> {
    let log_level = if let Some(level) = &cli.log_level {
        level.clone().into()
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(cli.verbose)
        .with_file(cli.verbose)
        .with_line_number(cli.verbose);

    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
