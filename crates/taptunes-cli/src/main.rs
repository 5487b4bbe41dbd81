//! TapTunes command-line entry point.
//!
//! One binary, three services: `supervise` runs the whole fleet (backend
//! plus the two hardware bridges as child processes), while `buttons` and
//! `presence` run a single bridge service in the foreground, which is
//! exactly how the supervisor launches them.

mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taptunes_core::constants::DEFAULT_BACKEND_URL;

#[derive(Parser)]
#[command(
    name = "taptunes",
    about = "TapTunes hardware bridge: buttons, RFID presence, and service supervision",
    version,
    propagate_version = true
)]
struct Cli {
    /// Base URL of the playback backend
    #[arg(long, global = true, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the backend and bridge services, and keep them alive
    Supervise {
        /// Installation directory (default: ~/taptunes)
        #[arg(long, env = "TAPTUNES_HOME")]
        home: Option<PathBuf>,

        /// Program used to launch the backend
        #[arg(long, env = "TAPTUNES_BACKEND_PROGRAM", default_value = "node")]
        backend_program: String,
    },

    /// Run the button dispatcher in the foreground
    Buttons,

    /// Run the presence tracker in the foreground
    Presence,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Supervise {
            home,
            backend_program,
        } => cmd::supervise::run(&cli.backend_url, home, backend_program).await,
        Commands::Buttons => cmd::buttons::run(&cli.backend_url).await,
        Commands::Presence => cmd::presence::run(&cli.backend_url).await,
    }
}
