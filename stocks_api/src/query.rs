//! Query parameters for the quote endpoint.

use url::Url;

/// Trait implemented by query builders that serialize themselves onto a URL.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Query for the market-quote endpoint: `symbols=<SYMBOL>`.
///
/// The symbol is sent as given. Several tickers may be packed into one
/// comma-separated string, which the upstream answers with one result each.
#[derive(Clone, Debug)]
pub struct QuoteQuery {
    pub symbols: String,
}

impl QuoteQuery {
    pub fn new(symbols: &str) -> Self {
        Self {
            symbols: symbols.to_string(),
        }
    }
}

impl Query for QuoteQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("symbols", self.symbols.as_str());
        url
    }
}
