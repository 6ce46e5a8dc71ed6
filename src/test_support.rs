//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::country::{CountryName, CountryRecord, Currency, NativeName};
use crate::core::nav::{Viewport, root_url};
use crate::core::state::App;
use crate::core::theme::ColorMode;
use crate::source::{CountrySource, SourceError};

/// A bare record with only the required fields set.
pub fn country(name: &str, region: &str) -> CountryRecord {
    CountryRecord {
        name: CountryName {
            common: name.to_string(),
            official: name.to_string(),
            native_name: BTreeMap::new(),
        },
        region: region.to_string(),
        subregion: None,
        capital: Vec::new(),
        population: 0,
        tld: Vec::new(),
        currencies: BTreeMap::new(),
        languages: BTreeMap::new(),
        borders: Vec::new(),
        area: None,
        flags: BTreeMap::new(),
        flag: None,
        cca3: None,
    }
}

pub fn japan() -> CountryRecord {
    let mut record = country("Japan", "Asia");
    record.name.native_name.insert(
        "jpn".to_string(),
        NativeName {
            official: "日本".to_string(),
            common: "日本".to_string(),
        },
    );
    record.subregion = Some("Eastern Asia".to_string());
    record.capital = vec!["Tokyo".to_string()];
    record.population = 125_836_021;
    record.tld = vec![".jp".to_string()];
    record.currencies.insert(
        "JPY".to_string(),
        Currency {
            name: "Japanese yen".to_string(),
            symbol: "¥".to_string(),
        },
    );
    record
        .languages
        .insert("jpn".to_string(), "Japanese".to_string());
    record.flag = Some("🇯🇵".to_string());
    record.cca3 = Some("JPN".to_string());
    record
}

pub fn france() -> CountryRecord {
    let mut record = country("France", "Europe");
    record.subregion = Some("Western Europe".to_string());
    record.capital = vec!["Paris".to_string()];
    record.population = 67_391_582;
    record.borders = vec!["BEL".to_string(), "DEU".to_string()];
    record.flag = Some("🇫🇷".to_string());
    record.cca3 = Some("FRA".to_string());
    record
}

/// In-memory source answering from a fixed record list, or failing every
/// call.
pub struct StaticSource {
    records: Vec<CountryRecord>,
    fail: bool,
}

impl StaticSource {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.fail {
            Err(SourceError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn all(&self) -> Result<Vec<CountryRecord>, SourceError> {
        self.check()?;
        Ok(self.records.clone())
    }

    async fn by_name(&self, name: &str) -> Result<Vec<CountryRecord>, SourceError> {
        self.check()?;
        let needle = name.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.common_name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn by_codes(&self, codes: &[String]) -> Result<Vec<CountryRecord>, SourceError> {
        self.check()?;
        Ok(self
            .records
            .iter()
            .filter(|r| r.cca3.as_ref().is_some_and(|code| codes.contains(code)))
            .cloned()
            .collect())
    }
}

/// Records every `scroll_to` call.
#[derive(Debug, Default)]
pub struct FakeViewport {
    pub y: u16,
    pub scrolls: Vec<u16>,
}

impl FakeViewport {
    pub fn at(y: u16) -> Self {
        Self {
            y,
            scrolls: Vec::new(),
        }
    }
}

impl Viewport for FakeViewport {
    fn scroll_y(&self) -> u16 {
        self.y
    }

    fn scroll_to(&mut self, y: u16) {
        self.y = y;
        self.scrolls.push(y);
    }
}

/// Creates a test App mounted at the root list location.
pub fn test_app() -> App {
    App::new(root_url(), ColorMode::Light)
}
