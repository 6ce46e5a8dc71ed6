//! REST Countries (v3.1) source.
//!
//! - `GET {base}/all`
//! - `GET {base}/name/{name}`
//! - `GET {base}/alpha?codes=A,B,C`
//!
//! Responses are passed through untouched apart from deserialization.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use crate::core::country::CountryRecord;
use crate::source::{CountrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

pub struct RestCountriesSource {
    base_url: Url,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| SourceError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Config(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// `base` with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_records(&self, url: Url) -> Result<Vec<CountryRecord>, SourceError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Country source error: {} - {}", status, message);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let records: Vec<CountryRecord> =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        info!("GET {} -> {} records", url.path(), records.len());
        Ok(records)
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError> {
        self.get_records(self.endpoint(&["all"])).await
    }

    async fn by_name(&self, name: &str) -> Result<Vec<CountryRecord>, SourceError> {
        self.get_records(self.endpoint(&["name", name])).await
    }

    async fn by_codes(&self, codes: &[String]) -> Result<Vec<CountryRecord>, SourceError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint(&["alpha"]);
        url.query_pairs_mut().append_pair("codes", &codes.join(","));
        self.get_records(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_encoded_segments() {
        let source = RestCountriesSource::new("https://example.com/v3.1/").unwrap();
        assert_eq!(
            source.endpoint(&["name", "Côte d'Ivoire"]).as_str(),
            "https://example.com/v3.1/name/C%C3%B4te%20d'Ivoire"
        );
        assert_eq!(
            source.endpoint(&["all"]).as_str(),
            "https://example.com/v3.1/all"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            RestCountriesSource::new("not a url"),
            Err(SourceError::Config(_))
        ));
        assert!(matches!(
            RestCountriesSource::new("mailto:someone@example.com"),
            Err(SourceError::Config(_))
        ));
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 404): Not Found");
    }

    #[tokio::test]
    async fn test_by_codes_with_no_codes_skips_request() {
        let source = RestCountriesSource::new("http://127.0.0.1:9").unwrap();
        assert!(source.by_codes(&[]).await.unwrap().is_empty());
    }
}
