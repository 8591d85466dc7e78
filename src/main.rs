use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kgraph::cli::{Cli, Commands};
use kgraph::config::Config;
use kgraph::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing goes to stderr so piped stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let config = Config::from_env();
            server::run_server(&host, port, config).await?;
        }
    }

    Ok(())
}
