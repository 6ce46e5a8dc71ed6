//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── dataset: Dataset              // raw countries or placeholder
//! ├── nav: NavigationSync           // list filters + scroll-restore guard
//! ├── history: MemoryHistory        // app locations (list / detail)
//! ├── view: View                    // what is on screen
//! ├── color_mode: ColorMode         // light / dark
//! ├── status_message: String        // status bar text
//! └── error: Option<String>         // last dataset fetch failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use reqwest::Url;

use crate::core::country::{CountryRecord, Dataset};
use crate::core::derive::{DerivedView, derive};
use crate::core::nav::{History, MemoryHistory, NavigationSync, Route};
use crate::core::theme::ColorMode;

/// A neighbouring country shown on the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderCountry {
    pub name: String,
    pub flag: String,
}

impl BorderCountry {
    pub fn from_record(record: &CountryRecord) -> Self {
        Self {
            name: record.common_name().to_string(),
            flag: record.flag.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailRecord {
    Loading,
    Loaded(Box<CountryRecord>),
    /// The source had no record under this name, or the request failed.
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Borders {
    Fetching,
    Loaded(Vec<BorderCountry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub name: String,
    pub country: DetailRecord,
    pub borders: Borders,
}

impl DetailState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: DetailRecord::Loading,
            borders: Borders::Fetching,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    List,
    Detail(DetailState),
}

pub struct App {
    pub dataset: Dataset,
    pub nav: NavigationSync,
    pub history: MemoryHistory,
    pub view: View,
    pub color_mode: ColorMode,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    /// Start at `location`, which may be a list or a detail route.
    pub fn new(location: Url, color_mode: ColorMode) -> Self {
        let view = match Route::from_url(&location) {
            Route::List => View::List,
            Route::Detail(name) => View::Detail(DetailState::new(name)),
        };
        Self {
            dataset: Dataset::default(),
            nav: NavigationSync::init_from_url(&location),
            history: MemoryHistory::new(location),
            view,
            color_mode,
            status_message: String::from("Loading countries..."),
            error: None,
        }
    }

    /// Derived lists for the current filters.
    pub fn derived(&self) -> DerivedView<'_> {
        derive(&self.dataset, &self.nav.filter)
    }

    pub fn location(&self) -> &Url {
        self.history.location()
    }

    pub fn detail(&self) -> Option<&DetailState> {
        match &self.view {
            View::Detail(detail) => Some(detail),
            View::List => None,
        }
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailState> {
        match &mut self.view {
            View::Detail(detail) => Some(detail),
            View::List => None,
        }
    }
}
