mod backend;
mod cli;
mod commands;
mod flash;
mod output;
mod templates;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing("timecapsule=info")?;
            commands::serve::run(&args).await
        }
        Commands::Status(args) => {
            init_tracing("timecapsule=warn")?;
            commands::status::run(&args).await
        }
        Commands::Health(args) => commands::health::run(&args).await,
    }
}

/// Initialize tracing, letting RUST_LOG add to the default directive
fn init_tracing(default_directive: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
