//! Providers module - one HTTP client per external data source.

pub mod cbr;
pub mod countries;
pub mod polygon;

pub use cbr::{CbrClient, Rate};
pub use countries::{CountriesClient, CountryInfo, Language};
pub use polygon::{PolygonClient, StockPoint};

/// Failure modes shared by all provider calls.
#[derive(Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, reading the body).
    Http(String),
    /// The provider answered with a non-success status code.
    Status(u16),
    /// The provider answered 2xx but the body wasn't the expected shape.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Http(e) => write!(f, "HTTP error: {e}"),
            ProviderError::Status(code) => write!(f, "Status error: {code}"),
            ProviderError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for ProviderError {}
