//! # Country Data Model
//!
//! Records as returned by the country-data service, plus the small option
//! types the filter controls work with.
//!
//! The core only ever looks at `name.common` and `region`. Everything else is
//! carried along for the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of skeleton slots shown while the dataset is loading.
pub const PLACEHOLDER_LEN: usize = 8;

/// Id of the synthetic "no region filter" option.
pub const GLOBAL_REGION_ID: &str = "-";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(default, rename = "nativeName")]
    pub native_name: BTreeMap<String, NativeName>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// One country as served by the data source.
///
/// `name.common` and `region` are required; a payload missing either fails
/// to deserialize as a whole.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountryRecord {
    pub name: CountryName,
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    /// cca3 codes of neighbouring countries.
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub flags: BTreeMap<String, String>,
    /// Flag emoji.
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub cca3: Option<String>,
}

impl CountryRecord {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }
}

/// Entry of the name-search control. `region` is only used to group the
/// options on display and is blank when the option came from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchOption {
    pub name: String,
    pub region: String,
}

impl SearchOption {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}

/// Entry of the region filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOption {
    pub id: String,
    pub label: String,
}

impl RegionOption {
    /// The "Global" sentinel: no region filter applied.
    pub fn global() -> Self {
        Self {
            id: GLOBAL_REGION_ID.to_string(),
            label: "Global".to_string(),
        }
    }

    /// A region whose id and label are both the region string.
    pub fn named(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            id: region.clone(),
            label: region,
        }
    }

    pub fn is_global(&self) -> bool {
        self.id == GLOBAL_REGION_ID
    }
}

impl Default for RegionOption {
    fn default() -> Self {
        Self::global()
    }
}

/// The raw country list, or the placeholder shown until it arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Still loading; holds the number of skeleton slots to draw.
    Placeholder(usize),
    Loaded(Vec<CountryRecord>),
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::Placeholder(PLACEHOLDER_LEN)
    }
}

impl Dataset {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Dataset::Loaded(_))
    }

    /// Loaded records. The placeholder reads as an empty dataset.
    pub fn records(&self) -> &[CountryRecord] {
        match self {
            Dataset::Placeholder(_) => &[],
            Dataset::Loaded(records) => records,
        }
    }
}
