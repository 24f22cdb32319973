use crate::error::FetchError;
use crate::schema::Quote;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

const QUOTE_ENDPOINT: &str = "https://finnhub.io/api/v1/quote";

pub fn quote_url(symbol: &str, token: &str) -> String {
    format!("{QUOTE_ENDPOINT}?symbol={symbol}&token={token}")
}

// `quote` schema
//
// Every field is optional: Finnhub returns `200 OK` with a body of nulls and
// zeroes for unknown symbols or a bad token, rather than an error status.
#[derive(Deserialize, Serialize, Debug)]
pub struct QuoteResponse {
    /// Current price.
    pub c: Option<f64>,
    /// Absolute change since previous close; null outside trading hours.
    pub d: Option<f64>,
    /// Percent change as reported upstream (unused; derived locally instead).
    pub dp: Option<f64>,
    /// High price of the day.
    pub h: Option<f64>,
    /// Low price of the day.
    pub l: Option<f64>,
    /// Open price of the day.
    pub o: Option<f64>,
    /// Previous close price.
    pub pc: Option<f64>,
    /// Unix timestamp of the quote, in seconds.
    pub t: Option<i64>,
}

/// Extract a normalized [`Quote`] from the raw payload.
///
/// Fails when the payload has no current price. A null change contributes 0,
/// and a zero-or-absent previous close is substituted with 1 so the division
/// stays defined.
pub fn extran(symbol: &str, response: QuoteResponse) -> Result<Quote, FetchError> {
    let price = response.c.ok_or_else(|| FetchError::MissingPrice {
        symbol: symbol.to_string(),
    })?;

    let change = response.d.unwrap_or(0.0);
    let previous_close = match response.pc {
        Some(pc) if pc != 0.0 => pc,
        _ => 1.0,
    };

    Ok(Quote {
        symbol: symbol.to_string(),
        price,
        change_percent: (change / previous_close) * 100.0,
        as_of: response.t.and_then(|t| {
            DateTime::from_timestamp(t, 0).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        }),
    })
}
