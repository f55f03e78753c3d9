//! Readpace CLI - Daily reading pacer for long texts

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "readpace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding settings, chunk records and progress
    #[arg(long, global = true, env = "READPACE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Setup,

    /// Split a book into daily reading units
    Process {
        /// Book file path (or a file name inside the books directory)
        file: String,

        /// Start the book over from its first unit
        #[arg(long)]
        reset: bool,
    },

    /// Show today's reading unit for a book
    Read {
        /// Book file name (defaults to current_book from settings)
        book: Option<String>,

        /// Mark the unit as read and deliver it
        #[arg(long)]
        send: bool,

        /// Print the whole unit instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Show reading statistics and per-book status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the delivery configuration
    TestEmail,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "readpace_cli=debug,readpace_core=debug"
    } else {
        "readpace_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Setup => commands::setup(&cli.data_dir),

        Commands::Process { file, reset } => commands::process(&cli.data_dir, &file, reset).await,

        Commands::Read { book, send, full } => {
            commands::read(&cli.data_dir, book.as_deref(), send, full).await
        }

        Commands::Status { json } => commands::status(&cli.data_dir, json).await,

        Commands::TestEmail => commands::test_email(&cli.data_dir),
    }
}
