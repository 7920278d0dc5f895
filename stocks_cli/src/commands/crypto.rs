//! The `crypto` subcommand: USD rates for crypto assets.

use anyhow::Result;
use clap::Args;
use stocks_api::Client;

use super::{lookup_all, report_missing};
use crate::output::{
    print_crypto_csv, print_crypto_markdown, print_crypto_table, print_json, OutputFormat,
};

#[derive(Args)]
pub struct CryptoArgs {
    /// Asset symbols, any case (e.g. btc ETH)
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

pub async fn run(args: &CryptoArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let results = lookup_all(&args.symbols, client, |client, symbol| async move {
        client.crypto(&symbol).await
    })
    .await?;

    let quotes = report_missing(results);
    if quotes.is_empty() {
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_crypto_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Csv => print_crypto_csv(&quotes)?,
        OutputFormat::Markdown => print_crypto_markdown(&quotes),
    }

    Ok(())
}
