//! CLI subcommand implementations.

pub mod crypto;
pub mod price;

use std::future::Future;

use anyhow::{Context, Result};
use stocks_api::Client;
use tokio::task::JoinSet;

/// Runs one lookup per symbol concurrently and returns the outcomes in the
/// order the symbols were given. The first failed lookup aborts the rest.
pub(crate) async fn lookup_all<T, F, Fut>(
    symbols: &[String],
    client: &Client,
    fetch: F,
) -> Result<Vec<(String, Option<T>)>>
where
    T: Send + 'static,
    F: Fn(Client, String) -> Fut,
    Fut: Future<Output = Result<Option<T>, stocks_api::Error>> + Send + 'static,
{
    let mut join_set = JoinSet::new();
    for (idx, symbol) in symbols.iter().enumerate() {
        let lookup = fetch(client.clone(), symbol.clone());
        let symbol = symbol.clone();
        join_set.spawn(async move { (idx, symbol, lookup.await) });
    }

    let mut results = Vec::with_capacity(symbols.len());
    while let Some(joined) = join_set.join_next().await {
        let (idx, symbol, result) = joined?;
        let found = result.with_context(|| format!("Lookup failed for {}", symbol))?;
        results.push((idx, symbol, found));
    }
    results.sort_by_key(|(idx, _, _)| *idx);

    Ok(results
        .into_iter()
        .map(|(_, symbol, found)| (symbol, found))
        .collect())
}

/// Keeps the found records and reports the missing symbols on stderr.
pub(crate) fn report_missing<T>(results: Vec<(String, Option<T>)>) -> Vec<T> {
    let mut found = Vec::with_capacity(results.len());
    for (symbol, record) in results {
        match record {
            Some(record) => found.push(record),
            None => eprintln!("No quote found for {}", symbol),
        }
    }
    found
}
