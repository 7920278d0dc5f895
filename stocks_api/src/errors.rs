//! Error types for the quote client.

/// Errors that can occur when fetching a quote.
///
/// A symbol that the upstream does not know is not an error: the fetchers
/// return `Ok(None)` for that case.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The upstream returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The upstream answered 2xx but the body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
