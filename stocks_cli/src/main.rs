mod commands;
mod output;
mod session;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stocks")]
#[command(about = "Look up stock and crypto quotes")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote one or more stock tickers
    Price(commands::price::PriceArgs),
    /// Quote one or more crypto assets by symbol
    Crypto(commands::crypto::CryptoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("stocks=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let http = session::build_session(Duration::from_secs(cli.timeout))?;
    let client = session::load_client(http);

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &client, &cli.output).await?,
        Commands::Crypto(args) => commands::crypto::run(args, &client, &cli.output).await?,
    }

    Ok(())
}
