//! Host side of the quote client: owns the HTTP session and hands it to the
//! client once at startup.

use std::time::Duration;

use anyhow::{Context, Result};
use stocks_api::user_agent::get_user_agent;
use stocks_api::{Client, QUOTE_BASE_URL, RATES_BASE_URL};

/// Builds the shared HTTP session. The timeout bounds every request made
/// through it; the client itself sets none.
pub fn build_session(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(get_user_agent())
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Loads the quote client with the session, honouring
/// `STOCKS_QUOTE_BASE_URL` and `STOCKS_RATES_BASE_URL` overrides.
pub fn load_client(http: reqwest::Client) -> Client {
    let (quote_base, rates_base) = resolve_base_urls(
        std::env::var("STOCKS_QUOTE_BASE_URL").ok(),
        std::env::var("STOCKS_RATES_BASE_URL").ok(),
    );
    if quote_base != QUOTE_BASE_URL || rates_base != RATES_BASE_URL {
        tracing::info!("Using quote host {} and rates host {}", quote_base, rates_base);
    }
    Client::with_base_urls(http, &quote_base, &rates_base)
}

fn resolve_base_urls(quote: Option<String>, rates: Option<String>) -> (String, String) {
    let pick = |value: Option<String>, default: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    (pick(quote, QUOTE_BASE_URL), pick(rates, RATES_BASE_URL))
}
