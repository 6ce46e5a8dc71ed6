//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User picks a region? That's `Action::RegionChanged(region)`.
//! Dataset arrives? That's `Action::CountriesLoaded(records)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter has to
//! perform next. No network or terminal access happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::country::{CountryRecord, Dataset, RegionOption, SearchOption};
use crate::core::nav::{History, NavigationSync, Route, detail_url, root_url};
use crate::core::state::{App, BorderCountry, Borders, DetailRecord, DetailState, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The full dataset arrived.
    CountriesLoaded(Vec<CountryRecord>),
    /// The dataset request failed; the list stays in its loading state.
    CountriesFailed(String),
    SearchChanged(Vec<SearchOption>),
    /// `None` clears the region filter.
    RegionChanged(Option<RegionOption>),
    OpenDetail(String),
    DetailLoaded {
        name: String,
        records: Vec<CountryRecord>,
    },
    DetailFailed {
        name: String,
        message: String,
    },
    BordersLoaded {
        name: String,
        borders: Vec<BorderCountry>,
    },
    Back,
    ToggleColorMode,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Look up the named country for the detail view.
    FetchDetail(String),
    /// Resolve border codes to names for the detail view of `name`.
    FetchBorders { name: String, codes: Vec<String> },
    /// The list view was mounted again; presentation state starts fresh.
    Remount,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::CountriesLoaded(records) => {
            info!("Dataset loaded: {} countries", records.len());
            app.status_message = format!("{} countries", records.len());
            app.error = None;
            app.dataset = Dataset::Loaded(records);
            Effect::None
        }
        Action::CountriesFailed(message) => {
            warn!("Dataset fetch failed: {}", message);
            app.status_message = format!("Failed to load countries: {message}");
            app.error = Some(message);
            Effect::None
        }
        Action::SearchChanged(selection) => {
            if app.view != View::List {
                return Effect::None;
            }
            app.status_message = match selection.len() {
                0 => String::from("Search cleared"),
                n => format!("Searching {n} countries"),
            };
            app.nav.on_search_change(&mut app.history, selection);
            Effect::None
        }
        Action::RegionChanged(region) => {
            if app.view != View::List {
                return Effect::None;
            }
            app.nav.on_region_change(&mut app.history, region);
            app.status_message = format!("Region: {}", app.nav.filter.current_region.label);
            Effect::None
        }
        Action::OpenDetail(name) => {
            debug!("Opening detail for {}", name);
            app.history.push(detail_url(&name));
            app.view = View::Detail(DetailState::new(name.clone()));
            app.status_message = name.clone();
            Effect::FetchDetail(name)
        }
        Action::DetailLoaded { name, records } => {
            let Some(detail) = current_detail(app, &name) else {
                debug!("Dropping stale detail response for {}", name);
                return Effect::None;
            };
            // Name lookups can match several countries; prefer the exact one.
            let record = match records.iter().position(|r| r.common_name() == name) {
                Some(i) => records.into_iter().nth(i),
                None => records.into_iter().next(),
            };

            match record {
                None => {
                    detail.country = DetailRecord::Missing;
                    detail.borders = Borders::Loaded(Vec::new());
                    Effect::None
                }
                Some(record) => {
                    let codes = record.borders.clone();
                    detail.country = DetailRecord::Loaded(Box::new(record));
                    if codes.is_empty() {
                        detail.borders = Borders::Loaded(Vec::new());
                        Effect::None
                    } else {
                        Effect::FetchBorders { name, codes }
                    }
                }
            }
        }
        Action::DetailFailed { name, message } => {
            let Some(detail) = current_detail(app, &name) else {
                return Effect::None;
            };
            detail.country = DetailRecord::Missing;
            detail.borders = Borders::Loaded(Vec::new());
            warn!("Detail fetch for {} failed: {}", name, message);
            app.status_message = format!("Failed to load {name}: {message}");
            Effect::None
        }
        Action::BordersLoaded { name, borders } => {
            if let Some(detail) = current_detail(app, &name) {
                detail.borders = Borders::Loaded(borders);
            }
            Effect::None
        }
        Action::Back => back(app),
        Action::ToggleColorMode => {
            app.color_mode = app.color_mode.toggled();
            app.status_message = format!("Theme: {}", app.color_mode.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn current_detail<'a>(app: &'a mut App, name: &str) -> Option<&'a mut DetailState> {
    app.detail_mut().filter(|detail| detail.name == name)
}

fn back(app: &mut App) -> Effect {
    let location = match app.history.back() {
        Some(location) => location.clone(),
        None if app.view == View::List => return Effect::None,
        None => {
            // Started on a detail route: fall back to the unfiltered list.
            app.history.replace(root_url());
            root_url()
        }
    };

    match Route::from_url(&location) {
        Route::List => {
            app.nav = NavigationSync::init_from_url(&location);
            app.view = View::List;
            app.status_message = match &app.dataset {
                Dataset::Loaded(records) => format!("{} countries", records.len()),
                Dataset::Placeholder(_) => String::from("Loading countries..."),
            };
            Effect::Remount
        }
        Route::Detail(name) => {
            app.view = View::Detail(DetailState::new(name.clone()));
            app.status_message = name.clone();
            Effect::FetchDetail(name)
        }
    }
}
