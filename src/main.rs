use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use modlog::config::Config;
use modlog::logging::{self, LogLine, Logger, Severity};
use modlog::record::NamedRecord;

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-module text logs with a severity threshold", long_about = None)]
struct Cli {
    /// Config file (default: ./modlog.toml, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample sequence of messages to a fresh log
    Demo {
        #[arg(short, long, default_value = "demo")]
        identifier: String,
    },
    /// Print the messages of a log file
    Show {
        /// Identifier the log was created with (e.g. `app.py`)
        identifier: String,
        /// Only print messages at or below this level
        #[arg(short, long, default_value_t = Severity::Debug)]
        level: Severity,
    },
    /// Remove log files older than the retention period
    Prune {
        /// Override the configured retention in days
        #[arg(short, long)]
        days: Option<u64>,
    },
    /// Write a sampled record to JSON and read it back
    Record {
        #[arg(short, long, default_value = "twenty_nums.json")]
        path: PathBuf,
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "modlog=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Demo { identifier } => run_demo(&identifier, &config),
        Command::Show { identifier, level } => run_show(&identifier, level, &config),
        Command::Prune { days } => {
            let days = days.unwrap_or(config.retention_days);
            let count = logging::cleanup_old_logs_with_retention(&config.logs_dir, days)?;
            tracing::info!("Cleaned up {} old log files", count);
            Ok(())
        }
        Command::Record { path, count } => run_record(&path, count, &config),
    }
}

fn run_demo(identifier: &str, config: &Config) -> Result<()> {
    let mut logger = Logger::in_dir(&config.logs_dir, identifier, Severity::Normal)?;
    tracing::info!("Logging to: {}", logger.path().display());

    logger.write("regular log message", Severity::Minimal)?;
    logger.write("regular log message", Severity::Normal)?;
    logger.write("regular log message", Severity::Debug)?;
    logger.write("\n regular log message", Severity::Minimal)?;
    logger.write("Final message", Severity::Minimal)?;
    logger.set_threshold(Severity::Debug);
    logger.write("regular log message", Severity::Debug)?;
    Ok(())
}

fn run_show(identifier: &str, level: Severity, config: &Config) -> Result<()> {
    let path = logging::log_path_for(&config.logs_dir, identifier);
    let lines = logging::read_log(&path)?;
    for line in logging::filter_by_threshold(&lines, level) {
        if let LogLine::Message {
            timestamp,
            level,
            text,
        } = line
        {
            println!("{timestamp}  {level:<7}  {text}");
        }
    }
    Ok(())
}

fn run_record(path: &Path, count: usize, config: &Config) -> Result<()> {
    let logger = Logger::from_config("record", config)?;

    let record = NamedRecord::sample("data_list", count, 100)?;
    logger.write(record.describe(), Severity::Normal)?;

    record.save_json(path)?;
    logger.write(format!("saved to {}", path.display()), Severity::Debug)?;

    let loaded = NamedRecord::load_json(path)?;
    logger.write(loaded.describe(), Severity::Normal)?;
    if loaded != record {
        logger.write("round trip mismatch", Severity::Minimal)?;
        anyhow::bail!("Record read back from {} differs", path.display());
    }

    println!("{}", loaded.describe());
    Ok(())
}
