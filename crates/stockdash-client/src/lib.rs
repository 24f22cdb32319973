//! Quote client for the dashboard: one HTTP request per ticker symbol
//! against the Finnhub quote endpoint, normalized into [`schema::Quote`]
//! records.

pub mod client_ext;
pub mod endp;
pub mod error;
pub mod schema;

pub mod prelude {
    pub use crate::client_ext::ClientExt;
    pub use crate::error::FetchError;
    pub use crate::schema::Quote;

    /// Build the shared HTTP client used for every quote request.
    pub fn build_client(user_agent: &str) -> Result<reqwest::Client, FetchError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
