use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod settings;

use cli::Cli;
use pipemeta_store::FileStore;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing; stdout is reserved for query results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pipemeta=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli)?;
    tracing::debug!("Using store {}", settings.store.display());

    let store = FileStore::new(settings.store_config());

    commands::execute(cli.command, &store, settings.format).await
}
