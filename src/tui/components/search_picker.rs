//! # Search Picker Component
//!
//! Overlay for choosing which countries to show. Opened with `/`.
//!
//! Options are grouped under their region. Typing narrows the list, Enter
//! toggles the highlighted country, Backspace on an empty query drops the
//! last selected country. Every change is emitted immediately so the filter
//! and the location stay in step while the overlay is open.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchPickerState` lives in `TuiState`
//! - `SearchPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::country::SearchOption;
use crate::core::format::format_list;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Persistent state for the search overlay.
pub struct SearchPickerState {
    /// Sorted options for the current region
    pub options: Vec<SearchOption>,
    /// Selected countries, in the order they were picked
    pub selection: Vec<SearchOption>,
    pub query: String,
    /// Index into the visible options
    pub cursor: usize,
    pub list_state: ListState,
}

/// Events emitted by the search picker.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPickerEvent {
    Changed(Vec<SearchOption>),
    Dismiss,
}

impl SearchPickerState {
    pub fn new(options: Vec<SearchOption>, selection: Vec<SearchOption>) -> Self {
        Self {
            options,
            selection,
            query: String::new(),
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    /// Options whose name contains the query, ignoring case.
    pub fn visible(&self) -> Vec<&SearchOption> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|option| option.name == name)
    }

    fn toggle(&mut self, option: SearchOption) {
        if let Some(pos) = self.selection.iter().position(|o| o.name == option.name) {
            self.selection.remove(pos);
        } else {
            self.selection.push(option);
        }
    }
}

impl EventHandler for SearchPickerState {
    type Event = SearchPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(SearchPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                let count = self.visible().len();
                if count > 0 {
                    self.cursor = (self.cursor + 1).min(count - 1);
                }
                None
            }
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                self.cursor = 0;
                None
            }
            TuiEvent::Backspace => {
                if self.query.pop().is_some() {
                    self.cursor = 0;
                    None
                } else {
                    self.selection
                        .pop()
                        .map(|_| SearchPickerEvent::Changed(self.selection.clone()))
                }
            }
            TuiEvent::Submit => {
                let option = self.visible().get(self.cursor).map(|o| (*o).clone())?;
                self.toggle(option);
                Some(SearchPickerEvent::Changed(self.selection.clone()))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the search overlay.
pub struct SearchPicker<'a> {
    state: &'a mut SearchPickerState,
    palette: Palette,
}

impl<'a> SearchPicker<'a> {
    pub fn new(state: &'a mut SearchPickerState, palette: Palette) -> Self {
        Self { state, palette }
    }
}

impl Component for SearchPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
            .title(" Search for a country ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Toggle  Backspace Remove  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [input_area, chips_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let input = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.palette.accent)),
            Span::styled(self.state.query.as_str(), Style::default().fg(self.palette.text)),
            Span::styled("█", Style::default().fg(self.palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(input), input_area);

        let names: Vec<&str> = self.state.selection.iter().map(|o| o.name.as_str()).collect();
        let chips = if names.is_empty() {
            Span::styled("Nothing selected", Style::default().fg(self.palette.muted))
        } else {
            Span::styled(
                format_list(&names),
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(chips)), chips_area);

        let visible = self.state.visible();
        if visible.is_empty() {
            let empty = Paragraph::new("No options")
                .style(Style::default().fg(self.palette.muted))
                .alignment(Alignment::Center);
            frame.render_widget(empty, list_area);
            return;
        }
        let cursor = self.state.cursor.min(visible.len() - 1);

        let header = Style::default()
            .fg(self.palette.group_fg)
            .bg(self.palette.group_bg)
            .add_modifier(Modifier::BOLD);
        let mut items = Vec::with_capacity(visible.len());
        let mut cursor_row = 0;
        let mut current_group: Option<&str> = None;
        for (i, option) in visible.iter().enumerate() {
            if current_group != Some(option.region.as_str()) {
                current_group = Some(option.region.as_str());
                items.push(ListItem::new(Line::styled(option.region.clone(), header)));
            }
            if i == cursor {
                cursor_row = items.len();
            }
            let mark = if self.state.is_selected(&option.name) {
                "[x] "
            } else {
                "[ ] "
            };
            let style = if i == cursor {
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(self.palette.text)
            };
            items.push(ListItem::new(Line::styled(format!("  {mark}{}", option.name), style)));
        }

        self.state.cursor = cursor;
        self.state.list_state.select(Some(cursor_row));
        frame.render_stateful_widget(List::new(items), list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ColorMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn options() -> Vec<SearchOption> {
        vec![
            SearchOption::new("China", "Asia"),
            SearchOption::new("Japan", "Asia"),
            SearchOption::new("France", "Europe"),
        ]
    }

    #[test]
    fn test_typing_narrows_options() {
        let mut state = SearchPickerState::new(options(), Vec::new());
        state.handle_event(&TuiEvent::InputChar('A'));
        state.handle_event(&TuiEvent::InputChar('n'));
        let names: Vec<&str> = state.visible().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Japan", "France"]);
    }

    #[test]
    fn test_submit_toggles_highlighted_option() {
        let mut state = SearchPickerState::new(options(), Vec::new());
        state.handle_event(&TuiEvent::CursorDown);
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(SearchPickerEvent::Changed(vec![SearchOption::new("Japan", "Asia")]))
        );

        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(SearchPickerEvent::Changed(Vec::new())));
    }

    #[test]
    fn test_selection_from_location_matches_by_name() {
        // Options restored from a location carry no region
        let mut state = SearchPickerState::new(options(), vec![SearchOption::new("China", "")]);
        assert!(state.is_selected("China"));
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(SearchPickerEvent::Changed(Vec::new())));
    }

    #[test]
    fn test_backspace_edits_query_then_selection() {
        let mut state = SearchPickerState::new(
            options(),
            vec![SearchOption::new("China", "Asia"), SearchOption::new("France", "Europe")],
        );
        state.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
        assert!(state.query.is_empty());

        let event = state.handle_event(&TuiEvent::Backspace);
        assert_eq!(
            event,
            Some(SearchPickerEvent::Changed(vec![SearchOption::new("China", "Asia")]))
        );
    }

    #[test]
    fn test_escape_dismisses_and_cursor_stays_in_bounds() {
        let mut state = SearchPickerState::new(options(), Vec::new());
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.cursor, 2);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SearchPickerEvent::Dismiss)
        );
    }

    #[test]
    fn test_render_groups_by_region() {
        let mut state = SearchPickerState::new(options(), vec![SearchOption::new("Japan", "Asia")]);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SearchPicker::new(&mut state, Palette::for_mode(ColorMode::Dark))
                    .render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Asia"));
        assert!(text.contains("Europe"));
        assert!(text.contains("[x] Japan"));
        assert!(text.contains("[ ] France"));
        // Cursor on China sits below the Asia header
        assert_eq!(state.list_state.selected(), Some(1));
    }
}
