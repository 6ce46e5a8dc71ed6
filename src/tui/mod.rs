//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! - Fetches run as tokio tasks and report back as `Action`s over a channel.
//! - The loop redraws only after input, a resize, or a background action.
//!   While something is loading the poll timeout is short so responses are
//!   picked up promptly.
//! - Each iteration on the list view gives `NavigationSync` the chance to
//!   restore the stored scroll offset into the grid; it does so at most once
//!   per mount, after the dataset has loaded.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::nav::NavigationSync;
use crate::core::state::{App, BorderCountry, Borders, View};
use crate::core::storage::{FileStorage, MemoryStorage, Storage};
use crate::source::{CountrySource, RestCountriesSource, SourceError};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryGridState, DetailEvent, DetailViewState, GridEvent, RegionPickerEvent,
    RegionPickerState, SearchPickerEvent, SearchPickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Overlay shown above the list view.
pub enum Overlay {
    Search(SearchPickerState),
    Region(RegionPickerState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub grid: CountryGridState,
    pub detail: DetailViewState,
    pub overlay: Option<Overlay>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            grid: CountryGridState::new(),
            detail: DetailViewState::new(),
            overlay: None,
        }
    }

    /// Open the search overlay on the options of the current region.
    pub fn open_search(&mut self, app: &App) {
        let options = app.derived().options;
        self.overlay = Some(Overlay::Search(SearchPickerState::new(
            options,
            app.nav.filter.search.clone(),
        )));
    }

    pub fn open_region(&mut self, app: &App) {
        let regions = app.derived().regions;
        self.overlay = Some(Overlay::Region(RegionPickerState::new(
            regions,
            &app.nav.filter.current_region,
        )));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn CountrySource>, SourceError> {
    let source = RestCountriesSource::new(&config.base_url)?;
    info!("Country source: {} at {}", source.name(), config.base_url);
    Ok(Arc::new(source))
}

fn build_storage(config: &ResolvedConfig) -> Box<dyn Storage> {
    match &config.storage_path {
        Some(path) => {
            info!("Storage file: {}", path.display());
            Box::new(FileStorage::new(path.clone()))
        }
        None => {
            warn!("No storage location; scroll offsets will not survive restarts");
            Box::new(MemoryStorage::new())
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let mut storage = build_storage(&config);
    let mut app = App::new(config.start_location.clone(), config.color_mode);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_load_countries(source.clone(), tx.clone());
    if let Some(detail) = app.detail() {
        spawn_fetch_detail(source.clone(), detail.name.clone(), tx.clone());
    }

    let mut needs_redraw = true; // Force first frame

    loop {
        if app.view == View::List
            && app
                .nav
                .restore_scroll_offset(&app.dataset, storage.as_ref(), &mut tui.grid)
        {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let waiting = !app.dataset.is_loaded()
            || app
                .detail()
                .is_some_and(|d| matches!(d.borders, Borders::Fetching));
        let timeout = if waiting {
            std::time::Duration::from_millis(50)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => Some(Action::Quit),
                TuiEvent::ToggleTheme => Some(Action::ToggleColorMode),
                _ => handle_view_event(&event, &app, &mut tui),
            };
            let Some(action) = action else {
                continue;
            };

            // Leaving the list: remember where it was scrolled to
            if app.view == View::List && matches!(action, Action::OpenDetail(_)) {
                NavigationSync::persist_scroll_offset(&tui.grid, storage.as_mut());
            }
            let effect = update(&mut app, action);
            if handle_effect(effect, &source, &tx, &mut tui) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if handle_effect(effect, &source, &tx, &mut tui) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Route an input event to the overlay or the active view.
fn handle_view_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    if let Some(overlay) = &mut tui.overlay {
        return match overlay {
            Overlay::Search(state) => match state.handle_event(event)? {
                SearchPickerEvent::Changed(selection) => Some(Action::SearchChanged(selection)),
                SearchPickerEvent::Dismiss => {
                    tui.overlay = None;
                    None
                }
            },
            Overlay::Region(state) => {
                let action = match state.handle_event(event)? {
                    RegionPickerEvent::Select(region) => Some(Action::RegionChanged(Some(region))),
                    RegionPickerEvent::Clear => Some(Action::RegionChanged(None)),
                    RegionPickerEvent::Dismiss => None,
                };
                tui.overlay = None;
                action
            }
        };
    }

    match &app.view {
        View::List => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('t') => Some(Action::ToggleColorMode),
            TuiEvent::InputChar('/') if app.dataset.is_loaded() => {
                tui.open_search(app);
                None
            }
            TuiEvent::InputChar('r') if app.dataset.is_loaded() => {
                tui.open_region(app);
                None
            }
            _ => match tui.grid.handle_event(event)? {
                GridEvent::Open(index) => app
                    .derived()
                    .countries
                    .get(index)
                    .map(|country| Action::OpenDetail(country.common_name().to_string())),
            },
        },
        View::Detail(detail) => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('t') => Some(Action::ToggleColorMode),
            _ => match tui.detail.handle_event(event)? {
                DetailEvent::Back => Some(Action::Back),
                DetailEvent::OpenBorder(index) => match &detail.borders {
                    Borders::Loaded(borders) => borders
                        .get(index)
                        .map(|border| Action::OpenDetail(border.name.clone())),
                    Borders::Fetching => None,
                },
            },
        },
    }
}

/// Perform the I/O an `Effect` asks for. Returns true when the loop should end.
fn handle_effect(
    effect: Effect,
    source: &Arc<dyn CountrySource>,
    tx: &mpsc::Sender<Action>,
    tui: &mut TuiState,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchDetail(name) => {
            tui.detail = DetailViewState::new();
            spawn_fetch_detail(source.clone(), name, tx.clone());
            false
        }
        Effect::FetchBorders { name, codes } => {
            spawn_fetch_borders(source.clone(), name, codes, tx.clone());
            false
        }
        Effect::Remount => {
            tui.grid = CountryGridState::new();
            tui.overlay = None;
            false
        }
    }
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Dropping background result: event loop has exited");
    }
}

fn spawn_load_countries(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) {
    info!("Spawning dataset fetch");
    tokio::spawn(async move {
        send(&tx, load_countries(source.as_ref()).await);
    });
}

fn spawn_fetch_detail(source: Arc<dyn CountrySource>, name: String, tx: mpsc::Sender<Action>) {
    info!("Spawning detail fetch for {}", name);
    tokio::spawn(async move {
        send(&tx, fetch_detail(source.as_ref(), name).await);
    });
}

fn spawn_fetch_borders(
    source: Arc<dyn CountrySource>,
    name: String,
    codes: Vec<String>,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning border fetch for {} ({} codes)", name, codes.len());
    tokio::spawn(async move {
        send(&tx, fetch_borders(source.as_ref(), name, &codes).await);
    });
}

async fn load_countries(source: &dyn CountrySource) -> Action {
    match source.all().await {
        Ok(records) => Action::CountriesLoaded(records),
        Err(e) => Action::CountriesFailed(e.to_string()),
    }
}

async fn fetch_detail(source: &dyn CountrySource, name: String) -> Action {
    match source.by_name(&name).await {
        Ok(records) => Action::DetailLoaded { name, records },
        Err(e) => Action::DetailFailed {
            name,
            message: e.to_string(),
        },
    }
}

/// A failed lookup settles on an empty border list.
async fn fetch_borders(source: &dyn CountrySource, name: String, codes: &[String]) -> Action {
    let borders = match source.by_codes(codes).await {
        Ok(records) => records.iter().map(BorderCountry::from_record).collect(),
        Err(e) => {
            warn!("Border lookup for {} failed: {}", name, e);
            Vec::new()
        }
    };
    Action::BordersLoaded { name, borders }
}
