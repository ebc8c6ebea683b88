//! Country metadata client for the public countries GraphQL API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::providers::ProviderError;

const COUNTRIES_URL: &str = "https://countries.trevorblades.com";

pub struct CountriesClient {
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GraphQlRequest {
    query: String,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<CountryData>,
}

#[derive(Deserialize)]
struct CountryData {
    country: Option<CountryInfo>,
}

/// One country record. Every field is required: a record with any of them
/// missing fails deserialization and is treated the same as no record.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub native: String,
    pub emoji: String,
    pub currency: String,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl CountriesClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Look up a country by its two-letter code.
    ///
    /// `Ok(None)` means the provider answered but has no record for the
    /// code; `Err` covers transport failures and malformed bodies.
    pub async fn lookup(&self, code: &str) -> Result<Option<CountryInfo>, ProviderError> {
        let request = GraphQlRequest {
            query: format!(
                "{{ country(code: \"{code}\") {{ name native emoji currency languages {{ code name }} }} }}"
            ),
        };

        let response = self
            .client
            .post(COUNTRIES_URL)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let parsed: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let country = parsed.data.and_then(|d| d.country);
        debug!(
            "Country lookup {code}: {}",
            if country.is_some() { "found" } else { "no record" }
        );
        Ok(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let json = r#"{
            "data": {
                "country": {
                    "name": "Belgium",
                    "native": "België",
                    "emoji": "🇧🇪",
                    "currency": "EUR",
                    "languages": [
                        {"code": "nl", "name": "Dutch"},
                        {"code": "fr", "name": "French"},
                        {"code": "de", "name": "German"}
                    ]
                }
            }
        }"#;
        let parsed: GraphQlResponse = serde_json::from_str(json).unwrap();
        let country = parsed.data.unwrap().country.unwrap();
        assert_eq!(country.name, "Belgium");
        assert_eq!(country.native, "België");
        assert_eq!(country.currency, "EUR");
        assert_eq!(country.languages.len(), 3);
        assert_eq!(country.languages[1].code, "fr");
        assert_eq!(country.languages[1].name, "French");
    }

    #[test]
    fn test_parse_unknown_code_is_null_country() {
        let json = r#"{"data": {"country": null}}"#;
        let parsed: GraphQlResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data.unwrap().country.is_none());
    }

    #[test]
    fn test_parse_record_with_missing_field_fails() {
        // "currency" absent: the record is rejected rather than half-filled.
        let json = r#"{
            "data": {
                "country": {
                    "name": "Belgium",
                    "native": "België",
                    "emoji": "🇧🇪",
                    "languages": []
                }
            }
        }"#;
        assert!(serde_json::from_str::<GraphQlResponse>(json).is_err());
    }

    #[test]
    fn test_query_embeds_code() {
        let request = GraphQlRequest {
            query: format!(
                "{{ country(code: \"{}\") {{ name native emoji currency languages {{ code name }} }} }}",
                "US"
            ),
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(body.contains(r#"country(code: \"US\")"#));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_lookup() {
        let client = CountriesClient::new();
        let country = client.lookup("US").await.unwrap().expect("US should exist");
        assert_eq!(country.name, "United States");
        assert!(!country.languages.is_empty());

        let missing = client.lookup("XX").await.unwrap();
        assert!(missing.is_none());
    }
}
