use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod collect;
pub mod list;

#[derive(Subcommand)]
enum Command {
    /// Collect sender metadata for every inbox message in a date range
    Collect {
        /// Start date (inclusive), YYYY/MM/DD or YYYY-MM-DD
        #[arg(long)]
        start: String,

        /// End date (exclusive), YYYY/MM/DD or YYYY-MM-DD
        #[arg(long)]
        end: String,

        /// Write JSON results to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the IDs of inbox messages in a date range
    List {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout only carries results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Handle each sub command
    match args.command {
        Some(Command::Collect { start, end, output }) => {
            collect::run(&start, &end, output.as_deref()).await?;
        }
        Some(Command::List { start, end }) => {
            list::run(&start, &end).await?;
        }
        None => {}
    }

    Ok(())
}
