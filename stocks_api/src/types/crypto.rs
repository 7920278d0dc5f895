//! Crypto rates endpoint payload and the [`CryptoQuote`] record built from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_decimal;
use crate::Error;

/// Public asset page; the upstream asset id is appended to it.
pub const ASSET_LINK_BASE: &str = "https://coincap.io/assets/";

#[derive(Deserialize)]
pub struct RatesResponse {
    pub data: Vec<Rate>,
}

impl RatesResponse {
    /// Returns the first asset, in response order, whose symbol matches
    /// `symbol` ignoring case.
    pub fn find(self, symbol: &str) -> Option<Rate> {
        let wanted = symbol.to_lowercase();
        self.data
            .into_iter()
            .find(|rate| {
                rate.symbol
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase() == wanted)
            })
    }
}

/// One asset entry. Fields are only required on the entry that is actually
/// matched; entries without a symbol are never matched.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price_usd: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "changePercent24Hr")]
    pub change_percent_24hr: Option<String>,
}

/// Current USD rate for a crypto asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CryptoQuote {
    pub symbol: String,
    /// Empty when the upstream has no name for the asset.
    pub name: String,
    pub price: Decimal,
    pub link: String,
    pub change_24hr_percent: Decimal,
}

impl TryFrom<Rate> for CryptoQuote {
    type Error = Error;

    fn try_from(rate: Rate) -> Result<Self, Self::Error> {
        let symbol = required("asset", "symbol", rate.symbol)?;
        let price = parse_decimal(
            "priceUsd",
            required(&symbol, "priceUsd", rate.price_usd)?.as_str(),
        )?;
        let change = parse_decimal(
            "changePercent24Hr",
            required(&symbol, "changePercent24Hr", rate.change_percent_24hr)?.as_str(),
        )?;
        let id = required(&symbol, "id", rate.id)?;

        Ok(Self {
            name: rate.name.unwrap_or_default(),
            price,
            link: format!("{}{}", ASSET_LINK_BASE, id),
            change_24hr_percent: change,
            symbol,
        })
    }
}

fn required(symbol: &str, field: &str, value: Option<String>) -> Result<String, Error> {
    value.ok_or_else(|| Error::InvalidResponse(format!("{} missing for {}", field, symbol)))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn rates(value: serde_json::Value) -> RatesResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_matched_entry() {
        let resp = rates(serde_json::json!({"data": [{
            "symbol": "BTC",
            "name": "Bitcoin",
            "priceUsd": "65000.12",
            "id": "bitcoin",
            "changePercent24Hr": "2.34"
        }]}));
        let quote = CryptoQuote::try_from(resp.find("btc").unwrap()).unwrap();

        assert_eq!(quote.symbol, "BTC");
        assert_eq!(quote.name, "Bitcoin");
        assert_eq!(quote.price, Decimal::from_str("65000.12").unwrap());
        assert_eq!(quote.link, "https://coincap.io/assets/bitcoin");
        assert_eq!(quote.change_24hr_percent, Decimal::from_str("2.34").unwrap());
    }

    #[test]
    fn find_is_case_insensitive_both_ways() {
        let resp = rates(serde_json::json!({"data": [{"symbol": "eth"}]}));
        assert!(resp.find("ETH").is_some());
    }

    #[test]
    fn first_match_wins() {
        let resp = rates(serde_json::json!({"data": [
            {"symbol": "DOGE", "id": "first"},
            {"symbol": "doge", "id": "second"}
        ]}));
        assert_eq!(resp.find("Doge").unwrap().id.as_deref(), Some("first"));
    }

    #[test]
    fn entries_without_symbol_are_skipped() {
        let resp = rates(serde_json::json!({"data": [
            {"symbol": null, "id": "before"},
            {
                "symbol": "BTC",
                "name": "Bitcoin",
                "priceUsd": "65000.12",
                "id": "bitcoin",
                "changePercent24Hr": "2.34"
            },
            {"symbol": null, "id": "weird"},
            {"id": "no-symbol-key"}
        ]}));
        let quote = CryptoQuote::try_from(resp.find("btc").unwrap()).unwrap();
        assert_eq!(quote.link, "https://coincap.io/assets/bitcoin");
    }

    #[test]
    fn missing_symbol_is_invalid() {
        let rate: Rate = serde_json::from_value(serde_json::json!({
            "priceUsd": "1",
            "id": "x",
            "changePercent24Hr": "0"
        }))
        .unwrap();
        let err = CryptoQuote::try_from(rate).unwrap_err();
        assert!(err.to_string().contains("symbol missing"));
    }

    #[test]
    fn no_match_is_none() {
        let resp = rates(serde_json::json!({"data": [{"symbol": "BTC"}]}));
        assert!(resp.find("XRP").is_none());
    }

    #[test]
    fn null_or_missing_name_is_empty() {
        for entry in [
            serde_json::json!({"symbol": "X", "name": null, "priceUsd": "1", "id": "x", "changePercent24Hr": "0"}),
            serde_json::json!({"symbol": "X", "priceUsd": "1", "id": "x", "changePercent24Hr": "0"}),
        ] {
            let rate: Rate = serde_json::from_value(entry).unwrap();
            assert_eq!(CryptoQuote::try_from(rate).unwrap().name, "");
        }
    }

    #[test]
    fn price_keeps_all_digits() {
        let rate: Rate = serde_json::from_value(serde_json::json!({
            "symbol": "SHIB",
            "priceUsd": "0.0000245178901234",
            "id": "shiba-inu",
            "changePercent24Hr": "-1.0001"
        }))
        .unwrap();
        let quote = CryptoQuote::try_from(rate).unwrap();
        assert_eq!(quote.price.to_string(), "0.0000245178901234");
    }

    #[test]
    fn missing_price_on_match_is_invalid() {
        let rate: Rate = serde_json::from_value(serde_json::json!({
            "symbol": "BTC",
            "id": "bitcoin",
            "changePercent24Hr": "1"
        }))
        .unwrap();
        let err = CryptoQuote::try_from(rate).unwrap_err();
        assert!(err.to_string().contains("priceUsd missing for BTC"));
    }

    #[test]
    fn null_change_on_match_is_invalid() {
        let rate: Rate = serde_json::from_value(serde_json::json!({
            "symbol": "BTC",
            "priceUsd": "1",
            "id": "bitcoin",
            "changePercent24Hr": null
        }))
        .unwrap();
        assert!(matches!(
            CryptoQuote::try_from(rate),
            Err(Error::InvalidResponse(_))
        ));
    }
}
