//! # Region Picker Component
//!
//! Overlay for choosing the region filter. Opened with `r`.
//! "Global" is listed first; Backspace clears the filter back to it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::country::RegionOption;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Persistent state for the region overlay.
pub struct RegionPickerState {
    pub regions: Vec<RegionOption>,
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the region picker.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionPickerEvent {
    Select(RegionOption),
    Clear,
    Dismiss,
}

impl RegionPickerState {
    /// `regions` are the regions present in the dataset; the highlight starts
    /// on `current`.
    pub fn new(regions: Vec<RegionOption>, current: &RegionOption) -> Self {
        let regions: Vec<RegionOption> = std::iter::once(RegionOption::global())
            .chain(regions.into_iter().filter(|r| !r.is_global()))
            .collect();
        let selected = regions
            .iter()
            .position(|r| r.id == current.id)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        Self {
            regions,
            selected,
            list_state,
        }
    }
}

impl EventHandler for RegionPickerState {
    type Event = RegionPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(RegionPickerEvent::Dismiss),
            TuiEvent::Backspace => Some(RegionPickerEvent::Clear),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.regions.len().saturating_sub(1));
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => self
                .regions
                .get(self.selected)
                .map(|region| RegionPickerEvent::Select(region.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the region overlay.
pub struct RegionPicker<'a> {
    state: &'a mut RegionPickerState,
    current: &'a RegionOption,
    palette: Palette,
}

impl<'a> RegionPicker<'a> {
    pub fn new(state: &'a mut RegionPickerState, current: &'a RegionOption, palette: Palette) -> Self {
        Self {
            state,
            current,
            palette,
        }
    }
}

impl Component for RegionPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
            .title(" Filter by Region ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Backspace Clear  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let is_active = region.id == self.current.id;
                let marker = if is_active { " *" } else { "" };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(self.palette.accent)
                } else {
                    Style::default().fg(self.palette.text)
                };
                ListItem::new(Line::styled(format!("{}{marker}", region.label), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
