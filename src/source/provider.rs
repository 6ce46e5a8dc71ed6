use std::fmt;

use async_trait::async_trait;

use crate::core::country::CountryRecord;

/// Errors that can occur while talking to a country source.
#[derive(Debug)]
pub enum SourceError {
    /// Source misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a list of country records.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Read-only access to the country dataset. Every call returns a complete
/// list or an error; there is no partial result.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// The full, unfiltered dataset.
    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError>;

    /// Records matching a country name.
    async fn by_name(&self, name: &str) -> Result<Vec<CountryRecord>, SourceError>;

    /// Records for a set of cca3 codes.
    async fn by_codes(&self, codes: &[String]) -> Result<Vec<CountryRecord>, SourceError>;
}
