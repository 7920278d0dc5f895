//! HTTP client for the market-quote and crypto-rates endpoints.

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, QuoteQuery},
    types::{CryptoQuote, QuoteEnvelope, RatesResponse, StockQuote},
    Error,
};

/// Production host of the market-quote endpoint.
pub const QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com";
const QUOTE_PATH: &str = "/v7/finance/quote";
/// Production host of the crypto-rates endpoint.
pub const RATES_BASE_URL: &str = "https://api.coincap.io";
const RATES_PATH: &str = "/v2/rates/";

/// Quote client built around a host-owned HTTP session.
///
/// The session is injected once and never replaced. Timeouts, user agent and
/// connection pooling are whatever the host configured on it; this client
/// adds nothing on top. Cloning shares the same session.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the quote endpoint. Defaults to `https://query1.finance.yahoo.com`.
    quote_base_url: String,
    /// Base URL for the rates endpoint. Defaults to `https://api.coincap.io`.
    rates_base_url: String,
}

impl Client {
    /// Creates a client against the production endpoints using the host's session.
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_urls(http, QUOTE_BASE_URL, RATES_BASE_URL)
    }

    /// Creates a client with custom base URLs. Used for testing with wiremock.
    pub fn with_base_urls(
        http: reqwest::Client,
        quote_base_url: &str,
        rates_base_url: &str,
    ) -> Self {
        Self {
            http,
            quote_base_url: quote_base_url.trim_end_matches('/').to_string(),
            rates_base_url: rates_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(
        &self,
        base_url: &str,
        path: &str,
        query: Option<&impl Query>,
    ) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, base_url: &str, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(base_url, path, query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::InvalidResponse(e.to_string())
        })
    }

    /// Fetches the quote for a ticker symbol.
    ///
    /// Returns `Ok(None)` when the upstream has no result for the symbol.
    /// Only the first result is used if the upstream returns several.
    pub async fn price(&self, symbol: &str) -> Result<Option<StockQuote>, Error> {
        let query = QuoteQuery::new(symbol);
        let envelope = self
            .get::<QuoteEnvelope, QuoteQuery>(&self.quote_base_url, QUOTE_PATH, Some(&query))
            .await?;

        match envelope.quote_response.result.into_iter().next() {
            Some(first) => StockQuote::try_from(first).map(Some),
            None => {
                tracing::debug!("No quote data for {}", symbol);
                Ok(None)
            }
        }
    }

    /// Fetches the current USD rate for a crypto asset symbol, ignoring case.
    ///
    /// The full top-asset list is fetched on every call and scanned in
    /// response order. Returns `Ok(None)` when no asset has the symbol.
    pub async fn crypto(&self, symbol: &str) -> Result<Option<CryptoQuote>, Error> {
        let rates = self
            .get::<RatesResponse, QuoteQuery>(&self.rates_base_url, RATES_PATH, None)
            .await?;

        match rates.find(symbol) {
            Some(rate) => CryptoQuote::try_from(rate).map(Some),
            None => {
                tracing::debug!("No crypto asset matches {}", symbol);
                Ok(None)
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
