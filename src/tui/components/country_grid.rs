//! # CountryGrid Component
//!
//! Scrollable grid of country cards. While the dataset is a placeholder the
//! grid shows skeleton cards instead.
//!
//! ## Architecture
//!
//! `CountryGrid` is a transient component (created each frame) that wraps
//! `&'a mut CountryGridState` (persistent state) and the cards to draw.
//! Column count, item count and viewport height are cached on the state
//! during render so event handling can move the selection between frames.
//!
//! `CountryGridState` is the list view's [`Viewport`]: the scroll offset
//! persisted before opening a detail view is its vertical offset.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::country::CountryRecord;
use crate::core::format::{MISSING, format_list, format_population};
use crate::core::nav::Viewport;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows per card: border, name, three property lines, border.
pub const CARD_HEIGHT: u16 = 6;
const MIN_CARD_WIDTH: u16 = 28;
const MAX_COLUMNS: usize = 4;

/// Number of card columns that fit in `width`.
pub fn column_count(width: u16) -> usize {
    ((width / MIN_CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

/// Cut `text` to at most `max_width` terminal cells, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Selection and scroll state for the grid.
/// Must be persisted in the parent TuiState; reset on every list mount.
pub struct CountryGridState {
    pub scroll_state: ScrollViewState,
    pub selected: usize,
    /// Columns used in the last render
    pub columns: usize,
    /// Cards drawn in the last render
    pub item_count: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Move the selection to the first visible card on the next render
    align_selection: bool,
}

impl Default for CountryGridState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Open the card at this index of the derived country list.
    Open(usize),
}

impl CountryGridState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: 0,
            columns: 1,
            item_count: 0,
            viewport_height: 0,
            align_selection: false,
        }
    }

    pub fn content_height(&self) -> u16 {
        let rows = self.item_count.div_ceil(self.columns.max(1));
        (rows as u16).saturating_mul(CARD_HEIGHT)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (self.item_count > 0).then(|| self.selected.min(self.item_count - 1))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    /// Scroll the viewport so the selected card is fully visible.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index() else {
            return;
        };
        let row = (idx / self.columns.max(1)) as u16;
        let card_top = row * CARD_HEIGHT;
        let card_bottom = card_top + CARD_HEIGHT;
        let offset_y = self.scroll_state.offset().y;

        if card_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: card_top });
        } else if card_bottom > offset_y + self.viewport_height {
            let new_y = card_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.item_count == 0 {
            return;
        }
        let last = self.item_count - 1;
        let current = self.selected.min(last) as isize;
        self.selected = (current + delta).clamp(0, last as isize) as usize;
        self.scroll_to_selected();
    }

    fn page_step(&self) -> isize {
        let rows = (self.viewport_height / CARD_HEIGHT).max(1) as usize;
        (rows * self.columns.max(1)) as isize
    }
}

impl Viewport for CountryGridState {
    fn scroll_y(&self) -> u16 {
        self.scroll_state.offset().y
    }

    fn scroll_to(&mut self, y: u16) {
        self.scroll_state.set_offset(Position { x: 0, y });
        self.align_selection = true;
    }
}

impl EventHandler for CountryGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let columns = self.columns.max(1) as isize;
        match event {
            TuiEvent::CursorLeft => self.move_by(-1),
            TuiEvent::CursorRight => self.move_by(1),
            TuiEvent::CursorUp => self.move_by(-columns),
            TuiEvent::CursorDown => self.move_by(columns),
            TuiEvent::ScrollPageUp => self.move_by(-self.page_step()),
            TuiEvent::ScrollPageDown => self.move_by(self.page_step()),
            TuiEvent::Home => {
                self.selected = 0;
                self.scroll_state.set_offset(Position { x: 0, y: 0 });
            }
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::Submit => return self.selected_index().map(GridEvent::Open),
            _ => {}
        }
        None
    }
}

/// What the grid draws this frame.
#[derive(Clone, Copy)]
pub enum GridItems<'a> {
    Skeleton(usize),
    Countries(&'a [&'a CountryRecord]),
}

impl GridItems<'_> {
    fn len(&self) -> usize {
        match self {
            GridItems::Skeleton(n) => *n,
            GridItems::Countries(countries) => countries.len(),
        }
    }
}

pub struct CountryGrid<'a> {
    pub state: &'a mut CountryGridState,
    pub items: GridItems<'a>,
    pub palette: Palette,
}

impl<'a> CountryGrid<'a> {
    pub fn new(state: &'a mut CountryGridState, items: GridItems<'a>, palette: Palette) -> Self {
        Self {
            state,
            items,
            palette,
        }
    }
}

impl Component for CountryGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let columns = column_count(content_width);
        let count = self.items.len();

        self.state.columns = columns;
        self.state.item_count = count;
        self.state.viewport_height = area.height;

        if count == 0 {
            let empty = Paragraph::new("No countries match the current filters.")
                .style(Style::default().fg(self.palette.muted))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        self.state.clamp_scroll();
        let offset_y = self.state.scroll_state.offset().y;
        if self.state.align_selection {
            let first_visible_row = offset_y.div_ceil(CARD_HEIGHT) as usize;
            self.state.selected = (first_visible_row * columns).min(count - 1);
            self.state.align_selection = false;
        }
        self.state.selected = self.state.selected.min(count - 1);

        let card_width = content_width / columns as u16;
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.content_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Only rows intersecting the viewport are drawn
        let first_row = (offset_y / CARD_HEIGHT) as usize;
        let last_row = ((offset_y + area.height) / CARD_HEIGHT) as usize;
        let visible = (first_row * columns)..((last_row + 1) * columns).min(count);

        for idx in visible {
            let row = (idx / columns) as u16;
            let col = (idx % columns) as u16;
            let rect = Rect::new(col * card_width, row * CARD_HEIGHT, card_width, CARD_HEIGHT);
            let selected = idx == self.state.selected;
            match self.items {
                GridItems::Skeleton(_) => {
                    scroll_view.render_widget(SkeletonCard { palette: self.palette }, rect);
                }
                GridItems::Countries(countries) => {
                    let card = CountryCard {
                        country: countries[idx],
                        selected,
                        palette: self.palette,
                    };
                    scroll_view.render_widget(card, rect);
                }
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// One country summary card.
pub struct CountryCard<'a> {
    pub country: &'a CountryRecord,
    pub selected: bool,
    pub palette: Palette,
}

impl Widget for CountryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let heading = match &self.country.flag {
            Some(flag) => format!("{flag} {}", self.country.common_name()),
            None => self.country.common_name().to_string(),
        };
        let capital = if self.country.capital.is_empty() {
            MISSING.to_string()
        } else {
            format_list(&self.country.capital)
        };

        let label = Style::default()
            .fg(self.palette.text)
            .add_modifier(Modifier::BOLD);
        let value = Style::default().fg(self.palette.muted);
        let property = |name: &str, text: String| {
            let text = truncate_to_width(&text, width.saturating_sub(name.width() + 2));
            Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::styled(text, value),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(truncate_to_width(&heading, width), label)),
            property("Population", format_population(self.country.population)),
            property("Region", self.country.region.clone()),
            property("Capital", capital),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Placeholder card drawn while the dataset loads.
pub struct SkeletonCard {
    pub palette: Palette,
}

impl Widget for SkeletonCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.palette.skeleton);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let lines: Vec<Line> = [width * 2 / 3, width, width * 3 / 4, width / 2]
            .into_iter()
            .map(|w| Line::styled("░".repeat(w), style))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
