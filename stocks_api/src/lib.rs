mod client;
mod errors;
mod query;
pub mod types;
pub mod user_agent;
pub use self::client::{Client, QUOTE_BASE_URL, RATES_BASE_URL};
pub use self::errors::Error;
pub use self::query::{Query, QuoteQuery};
pub use self::types::{CryptoQuote, StockQuote};
