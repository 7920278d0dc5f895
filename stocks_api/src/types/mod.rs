mod quote;
pub use self::quote::{QuoteEnvelope, QuoteResponse, QuoteResult, StockQuote};

mod crypto;
pub use self::crypto::{CryptoQuote, Rate, RatesResponse, ASSET_LINK_BASE};

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::Error;

/// Parses an upstream decimal string, accepting plain (`65000.12`) and
/// scientific (`1.5e-7`) notation.
pub(crate) fn parse_decimal(field: &str, text: &str) -> Result<Decimal, Error> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| {
            Error::InvalidResponse(format!("{} is not a decimal ({}): {}", field, text, e))
        })
}
