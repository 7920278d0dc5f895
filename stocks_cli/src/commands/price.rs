//! The `price` subcommand: stock quotes by ticker.

use anyhow::Result;
use clap::Args;
use stocks_api::Client;

use super::{lookup_all, report_missing};
use crate::output::{
    print_json, print_stock_csv, print_stock_markdown, print_stock_table, OutputFormat,
};

#[derive(Args)]
pub struct PriceArgs {
    /// Ticker symbols (e.g. AAPL MSFT)
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

pub async fn run(args: &PriceArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let results = lookup_all(&args.symbols, client, |client, symbol| async move {
        client.price(&symbol).await
    })
    .await?;

    let quotes = report_missing(results);
    if quotes.is_empty() {
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_stock_table(&quotes),
        OutputFormat::Json => print_json(&quotes),
        OutputFormat::Csv => print_stock_csv(&quotes)?,
        OutputFormat::Markdown => print_stock_markdown(&quotes),
    }

    Ok(())
}
