//! # Derived List Engine
//!
//! Pure functions from (dataset, region filter, name search) to the lists the
//! UI shows. Nothing here caches or mutates; callers recompute on demand.
//!
//! ```text
//! Dataset ──► filter_by_region ──► filter_by_search ──► grid
//!    │                 │
//!    ▼                 ▼
//! region_options   sort_options (search control, grouped by region)
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::country::{CountryRecord, Dataset, RegionOption, SearchOption};
use crate::core::nav::FilterState;

/// Region filter options: the Global sentinel, then every distinct region in
/// first-seen order. The placeholder dataset yields only the sentinel.
pub fn region_options(dataset: &Dataset) -> Vec<RegionOption> {
    let mut seen = HashSet::new();
    let mut options = vec![RegionOption::global()];
    for record in dataset.records() {
        if seen.insert(record.region.as_str()) {
            options.push(RegionOption::named(record.region.as_str()));
        }
    }
    options
}

/// Records under the given region, in original order. The Global sentinel
/// passes every record through.
pub fn filter_by_region<'a>(
    countries: &'a [CountryRecord],
    region: &RegionOption,
) -> Vec<&'a CountryRecord> {
    if region.is_global() {
        return countries.iter().collect();
    }
    countries
        .iter()
        .filter(|country| country.region == region.id)
        .collect()
}

/// Options for the name-search control, sorted by region (stable within a
/// region). Not the grid order.
pub fn sort_options(filtered: &[&CountryRecord]) -> Vec<SearchOption> {
    let mut options: Vec<SearchOption> = filtered
        .iter()
        .map(|country| SearchOption::new(country.common_name(), country.region.as_str()))
        .collect();
    options.sort_by(|a, b| locale_cmp(&a.region, &b.region));
    options
}

/// Records whose common name is one of the selected names, in the order of
/// `filtered`. Selected names with no matching record contribute nothing.
pub fn filter_by_search<'a>(
    filtered: &[&'a CountryRecord],
    search: &[SearchOption],
) -> Vec<&'a CountryRecord> {
    if search.is_empty() {
        return filtered.to_vec();
    }
    let names: HashSet<&str> = search.iter().map(|option| option.name.as_str()).collect();
    filtered
        .iter()
        .copied()
        .filter(|country| names.contains(country.common_name()))
        .collect()
}

/// Everything the list view needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub regions: Vec<RegionOption>,
    pub options: Vec<SearchOption>,
    pub countries: Vec<&'a CountryRecord>,
}

/// Run the full pipeline. While the dataset is a placeholder the option and
/// country lists stay empty.
pub fn derive<'a>(dataset: &'a Dataset, filter: &FilterState) -> DerivedView<'a> {
    let regions = region_options(dataset);
    if !dataset.is_loaded() {
        return DerivedView {
            regions,
            options: Vec::new(),
            countries: Vec::new(),
        };
    }
    let by_region = filter_by_region(dataset.records(), &filter.current_region);
    DerivedView {
        regions,
        options: sort_options(&by_region),
        countries: filter_by_search(&by_region, &filter.search),
    }
}

/// Case-insensitive ordering; on a tie lower case sorts before upper case.
/// Only case is folded, so accented letters sort after ASCII ("Ä" after "B").
fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
