use thiserror::Error;

/// Errors produced by the quote client.
///
/// A malformed payload is deliberately indistinguishable in effect from a
/// network failure: either one fails the whole batch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, status, or body-decoding failure from `reqwest`.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream payload carried no current-price field.
    #[error("no current price in quote payload for {symbol}")]
    MissingPrice { symbol: String },
}
