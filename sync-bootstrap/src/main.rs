use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "event-sync")]
#[command(about = "Event calendar reconciliation and deduplication", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile scraped events against the calendar (the default)
    Sync {
        /// Compute and report every decision without submitting anything
        #[arg(long)]
        dry_run: bool,
        /// Ignore the minimum-interval guard
        #[arg(long)]
        force: bool,
    },
    /// Remove duplicate entries already on the calendar
    Cleanup {
        /// Actually delete; the default is a dry run
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("SYNC_CONFIG", config);
    }

    match args.command.unwrap_or(Command::Sync {
        dry_run: false,
        force: false,
    }) {
        Command::Sync { dry_run, force } => sync_bootstrap::run_sync_once(dry_run, force).await,
        Command::Cleanup { force } => sync_bootstrap::run_cleanup_once(force).await,
    }
}
