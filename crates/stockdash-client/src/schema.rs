use serde::{Deserialize, Serialize};

/// Normalized price/change record for one ticker symbol.
///
/// Built once per fetch and immutable afterwards; the view only ever reads
/// these.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Quote {
    /// Uppercase ticker symbol, e.g. `AAPL`.
    pub symbol: String,
    /// Current price in dollars.
    pub price: f64,
    /// Change since previous close, as a signed percentage.
    pub change_percent: f64,
    /// Upstream quote time, when the payload carried one.
    pub as_of: Option<String>,
}
