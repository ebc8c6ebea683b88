//! Polygon.io daily aggregates client.

use serde::Deserialize;
use tracing::warn;

use crate::providers::ProviderError;

const POLYGON_BASE_URL: &str = "https://api.polygon.io/v2/aggs/ticker";

pub struct PolygonClient {
    api_key: String,
    client: reqwest::Client,
}

/// One daily aggregate bar, field names as the provider sends them.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StockPoint {
    /// Window start, Unix milliseconds.
    pub t: i64,
    /// Open price.
    pub o: f64,
    /// Close price.
    pub c: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Trading volume.
    pub v: f64,
}

#[derive(Deserialize)]
struct AggsResponse {
    /// Absent when the provider has nothing for the range; an empty array
    /// is a different (successful) answer.
    results: Option<Vec<StockPoint>>,
}

impl PolygonClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch day-granularity aggregates for an inclusive date range.
    ///
    /// Ticker and dates are passed through verbatim; the provider rejects
    /// anything it doesn't like and that surfaces as a `Status` error.
    pub async fn day_aggregates(
        &self,
        ticker: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<StockPoint>, ProviderError> {
        let url = format!("{POLYGON_BASE_URL}/{ticker}/range/1/day/{from}/{to}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("adjusted", "true"),
                ("sort", "asc"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Polygon error {status}: {body}");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let parsed: AggsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        parsed
            .results
            .ok_or_else(|| ProviderError::Parse("no results field".to_string()))
    }
}
