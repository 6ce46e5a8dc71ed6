//! # TUI Components
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: title, status message and color mode switch
//! - `FilterBar`: summary of the active search and region filters
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent `*State` types live in `TuiState` and handle events; a
//! transient wrapper borrows the state each frame to render it.
//! - `CountryGrid`: scrollable card grid, the list view's viewport
//! - `SearchPicker`: grouped multi-select overlay for country names
//! - `RegionPicker`: region filter overlay
//! - `DetailView`: properties and border countries of one country
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── filter_bar.rs
//! ├── country_grid.rs
//! ├── search_picker.rs
//! ├── region_picker.rs
//! └── detail.rs
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod country_grid;
pub mod detail;
mod filter_bar;
pub mod region_picker;
pub mod search_picker;
mod title_bar;

pub use country_grid::{CountryGrid, CountryGridState, GridEvent, GridItems};
pub use detail::{DetailEvent, DetailView, DetailViewState};
pub use filter_bar::FilterBar;
pub use region_picker::{RegionPicker, RegionPickerEvent, RegionPickerState};
pub use search_picker::{SearchPicker, SearchPickerEvent, SearchPickerState};
pub use title_bar::TitleBar;

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
