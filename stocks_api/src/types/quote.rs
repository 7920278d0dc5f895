//! Market-quote endpoint payload and the [`StockQuote`] record built from it.

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::parse_decimal;
use crate::Error;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEnvelope {
    pub quote_response: QuoteResponse,
}

#[derive(Deserialize)]
pub struct QuoteResponse {
    pub result: Vec<QuoteResult>,
}

/// One entry of `quoteResponse.result`. Only the fields mapped into
/// [`StockQuote`] are read; prices are kept as raw JSON numbers until
/// conversion so they can be decimalized from their text.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub symbol: String,
    pub long_name: String,
    pub regular_market_price: Number,
    pub regular_market_change: Number,
    pub regular_market_change_percent: Number,
    pub regular_market_open: Number,
    pub regular_market_previous_close: Number,
    pub regular_market_day_high: Number,
    pub regular_market_day_low: Number,
    pub regular_market_volume: Number,
    pub regular_market_time: i64,
}

/// Point-in-time quote for a ticker symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StockQuote {
    pub symbol: String,
    pub company: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub market_open: Decimal,
    /// Previous session's close.
    pub market_close: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    /// Time of the last regular-market trade, in the local time zone.
    pub time: DateTime<Local>,
}

impl TryFrom<QuoteResult> for StockQuote {
    type Error = Error;

    fn try_from(quote: QuoteResult) -> Result<Self, Self::Error> {
        let time = DateTime::from_timestamp(quote.regular_market_time, 0)
            .map(|t| t.with_timezone(&Local))
            .ok_or_else(|| {
                Error::InvalidResponse(format!(
                    "regularMarketTime out of range: {}",
                    quote.regular_market_time
                ))
            })?;

        Ok(Self {
            price: number_to_decimal("regularMarketPrice", &quote.regular_market_price)?,
            change: number_to_decimal("regularMarketChange", &quote.regular_market_change)?,
            change_percent: number_to_decimal(
                "regularMarketChangePercent",
                &quote.regular_market_change_percent,
            )?,
            market_open: number_to_decimal("regularMarketOpen", &quote.regular_market_open)?,
            market_close: number_to_decimal(
                "regularMarketPreviousClose",
                &quote.regular_market_previous_close,
            )?,
            high: number_to_decimal("regularMarketDayHigh", &quote.regular_market_day_high)?,
            low: number_to_decimal("regularMarketDayLow", &quote.regular_market_day_low)?,
            volume: number_to_decimal("regularMarketVolume", &quote.regular_market_volume)?,
            symbol: quote.symbol,
            company: quote.long_name,
            time,
        })
    }
}

// Goes through the number's shortest textual form so 0.1 stays 0.1 instead of
// picking up the binary expansion of the f64.
fn number_to_decimal(field: &str, number: &Number) -> Result<Decimal, Error> {
    parse_decimal(field, &number.to_string())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "symbol": "AAPL",
            "longName": "Apple Inc.",
            "regularMarketPrice": 150.0,
            "regularMarketChange": 1.5,
            "regularMarketChangePercent": 1.0,
            "regularMarketOpen": 149.0,
            "regularMarketPreviousClose": 148.5,
            "regularMarketDayHigh": 151.0,
            "regularMarketDayLow": 148.0,
            "regularMarketVolume": 1000000,
            "regularMarketTime": 1700000000
        })
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn maps_all_fields() {
        let result: QuoteResult = serde_json::from_value(sample()).unwrap();
        let quote = StockQuote::try_from(result).unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.company, "Apple Inc.");
        assert_eq!(quote.price, dec("150"));
        assert_eq!(quote.change, dec("1.5"));
        assert_eq!(quote.change_percent, dec("1"));
        assert_eq!(quote.market_open, dec("149"));
        assert_eq!(quote.market_close, dec("148.5"));
        assert_eq!(quote.high, dec("151"));
        assert_eq!(quote.low, dec("148"));
        assert_eq!(quote.volume, dec("1000000"));
        assert_eq!(quote.time.timestamp(), 1_700_000_000);
    }

    #[test]
    fn time_is_epoch_seconds_in_local_zone() {
        let result: QuoteResult = serde_json::from_value(sample()).unwrap();
        let quote = StockQuote::try_from(result).unwrap();

        let utc = NaiveDate::from_ymd_opt(2023, 11, 14)
            .unwrap()
            .and_hms_opt(22, 13, 20)
            .unwrap();
        assert_eq!(quote.time.naive_utc(), utc);

        let offset = Local.offset_from_utc_datetime(&utc);
        assert_eq!(quote.time.offset().local_minus_utc(), offset.local_minus_utc());
        assert_eq!(
            quote.time.naive_local(),
            utc + chrono::Duration::seconds(i64::from(offset.local_minus_utc()))
        );
    }

    #[test]
    fn float_prices_have_no_binary_artifacts() {
        let mut value = sample();
        value["regularMarketPrice"] = serde_json::json!(0.1);
        value["regularMarketChange"] = serde_json::json!(-0.07);
        let result: QuoteResult = serde_json::from_value(value).unwrap();
        let quote = StockQuote::try_from(result).unwrap();

        assert_eq!(quote.price.to_string(), "0.1");
        assert_eq!(quote.change, dec("-0.07"));
    }

    #[test]
    fn tiny_values_use_scientific_fallback() {
        let mut value = sample();
        value["regularMarketChangePercent"] = serde_json::json!(1.5e-7);
        let result: QuoteResult = serde_json::from_value(value).unwrap();
        let quote = StockQuote::try_from(result).unwrap();
        assert_eq!(quote.change_percent, dec("0.00000015"));
    }

    #[test]
    fn out_of_range_time_is_invalid() {
        let mut value = sample();
        value["regularMarketTime"] = serde_json::json!(i64::MAX);
        let result: QuoteResult = serde_json::from_value(value).unwrap();
        let err = StockQuote::try_from(result).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("longName");
        assert!(serde_json::from_value::<QuoteResult>(value).is_err());
    }

    #[test]
    fn quotes_compare_by_value() {
        let parse = || {
            let result: QuoteResult = serde_json::from_value(sample()).unwrap();
            StockQuote::try_from(result).unwrap()
        };
        let (a, b) = (parse(), parse());
        assert_eq!(a, b);
    }
}
