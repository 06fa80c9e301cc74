//! CLI argument definitions for the Timecapsule binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Message store type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// JSON file in the data directory (default)
    File,
    /// In-memory only; everything is lost on exit
    Memory,
}

/// Time capsule server
#[derive(Parser, Debug)]
#[command(name = "timecapsule")]
#[command(about = "Timecapsule: five messages, sealed until Saturday evening")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),
    /// Print the capsule as it would be shown right now
    Status(StatusArgs),
    /// Check health of a running server
    Health(HealthArgs),
}

/// Where the capsule lives and how its target is chosen
#[derive(clap::Args, Debug, Clone)]
pub struct CapsuleConfig {
    /// Message store to use
    #[arg(short, long, default_value = "file", env = "TIMECAPSULE_STORE")]
    pub store: StoreKind,

    /// Data directory for capsule_data.json and capsule_target.json
    #[arg(short = 'D', long, env = "TIMECAPSULE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Recompute the reveal target on every request instead of pinning the first one.
    /// The capsule never opens in this mode.
    #[arg(long, env = "TIMECAPSULE_ROLLING_TARGET")]
    pub rolling_target: bool,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "TIMECAPSULE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "TIMECAPSULE_HOST")]
    pub host: String,

    #[command(flatten)]
    pub capsule: CapsuleConfig,
}

/// Arguments for the status command
#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub capsule: CapsuleConfig,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:3000", env = "TIMECAPSULE_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
