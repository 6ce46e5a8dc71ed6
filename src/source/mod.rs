//! # Country Data Source
//!
//! Where the raw dataset comes from. The core never talks to the network;
//! the TUI calls a [`CountrySource`] from background tasks and feeds the
//! results back in as actions.

pub mod provider;
pub mod rest_countries;

pub use provider::{CountrySource, SourceError};
pub use rest_countries::{DEFAULT_BASE_URL, RestCountriesSource};
