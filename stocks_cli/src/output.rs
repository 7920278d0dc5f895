use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use stocks_api::{CryptoQuote, StockQuote};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct StockRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Company")]
    #[serde(rename = "Company")]
    company: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    change_percent: String,
    #[tabled(rename = "Open")]
    #[serde(rename = "Open")]
    open: String,
    #[tabled(rename = "Prev Close")]
    #[serde(rename = "Prev Close")]
    prev_close: String,
    #[tabled(rename = "High")]
    #[serde(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    #[serde(rename = "Low")]
    low: String,
    #[tabled(rename = "Volume")]
    #[serde(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
}

#[derive(Tabled, Serialize)]
struct CryptoRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Price (USD)")]
    #[serde(rename = "Price (USD)")]
    price: String,
    #[tabled(rename = "24h %")]
    #[serde(rename = "24h %")]
    change_24hr_percent: String,
    #[tabled(rename = "Link")]
    #[serde(rename = "Link")]
    link: String,
}

// -- Row builders --

fn build_stock_rows(quotes: &[StockQuote]) -> Vec<StockRow> {
    quotes
        .iter()
        .map(|q| StockRow {
            symbol: q.symbol.clone(),
            company: q.company.clone(),
            price: fixed(q.price, 2),
            change: signed(q.change),
            change_percent: format!("{}%", signed(q.change_percent)),
            open: fixed(q.market_open, 2),
            prev_close: fixed(q.market_close, 2),
            high: fixed(q.high, 2),
            low: fixed(q.low, 2),
            volume: format_volume(q.volume),
            time: q.time.format("%Y-%m-%d %H:%M %:z").to_string(),
        })
        .collect()
}

fn build_crypto_rows(quotes: &[CryptoQuote]) -> Vec<CryptoRow> {
    quotes
        .iter()
        .map(|q| CryptoRow {
            symbol: q.symbol.clone(),
            name: q.name.clone(),
            price: format_crypto_price(q.price),
            change_24hr_percent: format!("{}%", signed(q.change_24hr_percent)),
            link: q.link.clone(),
        })
        .collect()
}

// -- Table output --

pub fn print_stock_table(quotes: &[StockQuote]) {
    println!("{}", Table::new(build_stock_rows(quotes)));
}

pub fn print_crypto_table(quotes: &[CryptoQuote]) {
    println!("{}", Table::new(build_crypto_rows(quotes)));
}

// -- Markdown output --

pub fn print_stock_markdown(quotes: &[StockQuote]) {
    let mut table = Table::new(build_stock_rows(quotes));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_crypto_markdown(quotes: &[CryptoQuote]) {
    let mut table = Table::new(build_crypto_rows(quotes));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

// Upstream text columns are sanitized; the numeric columns are built here.
fn build_stock_csv_rows(quotes: &[StockQuote]) -> Vec<StockRow> {
    build_stock_rows(quotes)
        .into_iter()
        .map(|mut row| {
            row.symbol = sanitize_csv_field(&row.symbol);
            row.company = sanitize_csv_field(&row.company);
            row
        })
        .collect()
}

fn build_crypto_csv_rows(quotes: &[CryptoQuote]) -> Vec<CryptoRow> {
    build_crypto_rows(quotes)
        .into_iter()
        .map(|mut row| {
            row.symbol = sanitize_csv_field(&row.symbol);
            row.name = sanitize_csv_field(&row.name);
            row.link = sanitize_csv_field(&row.link);
            row
        })
        .collect()
}

pub fn print_stock_csv(quotes: &[StockQuote]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_stock_csv_rows(quotes) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_crypto_csv(quotes: &[CryptoQuote]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_crypto_csv_rows(quotes) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Formatting helpers --

fn rounded(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half away from zero and pads to exactly `dp` decimal places.
fn fixed(value: Decimal, dp: u32) -> String {
    let mut value = rounded(value, dp);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value.rescale(dp);
    value.to_string()
}

fn signed(value: Decimal) -> String {
    let text = fixed(value, 2);
    if text.starts_with('-') || text == "0.00" {
        text
    } else {
        format!("+{}", text)
    }
}

// The unit is picked after rounding so 999950 reads 1.0M, not 1000.0K.
fn format_volume(volume: Decimal) -> String {
    let thousand = Decimal::from(1_000);
    if rounded(volume, 0) < thousand {
        return fixed(volume, 0);
    }
    let thousands = rounded(volume / thousand, 1);
    if thousands < thousand {
        return format!("{}K", fixed(thousands, 1));
    }
    format!("{}M", fixed(volume / Decimal::from(1_000_000), 1))
}

// Sub-dollar assets keep more digits so the price does not collapse to 0.00.
fn format_crypto_price(price: Decimal) -> String {
    if price.abs() >= Decimal::ONE {
        fixed(price, 2)
    } else {
        price.normalize().to_string()
    }
}

/// Neutralizes spreadsheet formula injection in free-text CSV cells.
fn sanitize_csv_field(field: &str) -> String {
    match field.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("\t{}", field),
        _ => field.to_string(),
    }
}
