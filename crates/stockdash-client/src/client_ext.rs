use crate::endp::finnhub;
use crate::error::FetchError;
use crate::schema::Quote;
use reqwest::Client;
use std::future::Future;

pub trait ClientExt {
    fn fetch_quote(
        &self,
        symbol: &str,
        token: &str,
    ) -> impl Future<Output = Result<Quote, FetchError>> + Send;

    fn fetch_quotes(
        &self,
        symbols: &[String],
        token: &str,
    ) -> impl Future<Output = Result<Vec<Quote>, FetchError>> + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientExt for Client {
    /// Fetch and normalize the quote of a single symbol.
    ///
    /// One GET request, no retries, no timeout; any failure propagates.
    async fn fetch_quote(&self, symbol: &str, token: &str) -> Result<Quote, FetchError> {
        let url = finnhub::quote_url(symbol, token);
        let response: finnhub::QuoteResponse = self.get(url).send().await?.json().await?;
        log::debug!("[{symbol}] quote payload: {response:?}");
        finnhub::extran(symbol, response)
    }

    /// Fetch every symbol concurrently, preserving list order.
    ///
    /// All-or-nothing: the first failure fails the whole batch.
    async fn fetch_quotes(&self, symbols: &[String], token: &str) -> Result<Vec<Quote>, FetchError> {
        futures::future::try_join_all(
            symbols.iter().map(|symbol| self.fetch_quote(symbol, token)),
        )
        .await
    }
}
