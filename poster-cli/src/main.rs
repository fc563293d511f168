//! # Poster CLI
//!
//! Runs one subcommand and prints its JSON result.

use clap::Parser;
use poster_cli::{commands, CliArgs, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "poster_cli=info,poster_core=info,poster_services=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = CliConfig::from(args);
    tracing::debug!(
        generation_url = %config.services.generation_url,
        verse_url = %config.services.verse_url,
        "Service endpoints"
    );

    let output = commands::run(config.command, &config.services).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
