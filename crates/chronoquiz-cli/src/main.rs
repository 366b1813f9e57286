//! chronoquiz CLI — guess the year of historical events in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chronoquiz", version, about = "Guess-the-year history quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to load events from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Named source from the config file
    #[arg(long, conflicts_with_all = ["file", "url"])]
    source: Option<String>,

    /// Read events from a local JSON file
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Fetch events from this URL
    #[arg(long)]
    url: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of questions (default from config, normally 10)
        #[arg(long)]
        length: Option<usize>,

        /// Only events whose label or tags contain this text
        #[arg(long)]
        tag: Option<String>,

        /// Earliest year, e.g. "-500" or "500 BC"
        #[arg(long, allow_negative_numbers = true, value_parser = parse_year_arg)]
        min_year: Option<i32>,

        /// Latest year, e.g. "1900" or "1900 AD"
        #[arg(long, allow_negative_numbers = true, value_parser = parse_year_arg)]
        max_year: Option<i32>,

        /// Seed for the question shuffle (repeatable sessions)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List tags and how many events carry each
    Tags {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Load the event data and report problems
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create starter config and sample event file
    Init,
}

fn parse_year_arg(s: &str) -> Result<i32, String> {
    chronoquiz_core::guess::parse_guess(s, chronoquiz_core::Era::Ad).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chronoquiz=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            source,
            length,
            tag,
            min_year,
            max_year,
            seed,
        } => commands::play::execute(source, length, tag, min_year, max_year, seed).await,
        Commands::Tags { source } => commands::tags::execute(source).await,
        Commands::Validate { source } => commands::validate::execute(source).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
