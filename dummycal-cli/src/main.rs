mod commands;
mod parse;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dummycal_core::config::DummycalConfig;
use dummycal_core::store::DirStore;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "dummycal")]
#[command(about = "Fill your caldir calendars with random dummy events for testing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the calendars dummy events can be added to
    Calendars {
        /// Grant access without asking if it was never requested
        #[arg(short, long)]
        yes: bool,
    },
    /// Show, grant or revoke access to your calendar directory
    Auth {
        /// Grant access
        #[arg(long, conflicts_with = "revoke")]
        grant: bool,

        /// Revoke access
        #[arg(long)]
        revoke: bool,

        /// Grant access without asking if it was never requested
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a new, empty calendar
    CreateCalendar {
        title: String,

        /// Grant access without asking if it was never requested
        #[arg(short, long)]
        yes: bool,
    },
    /// Add randomly generated events to a calendar
    Generate(commands::generate::GenerateArgs),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = DummycalConfig::load()?;
    let mut store = DirStore::new(config.data_path());
    let session = Session::default();

    match cli.command {
        Commands::Calendars { yes } => commands::calendars::run(&mut store, yes),
        Commands::Auth { grant, revoke, yes } => commands::auth::run(&mut store, grant, revoke, yes),
        Commands::CreateCalendar { title, yes } => {
            commands::create_calendar::run(&mut store, &title, yes)
        }
        Commands::Generate(args) => commands::generate::run(&mut store, &config, &session, args),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
