//! # DetailView Component
//!
//! Full-page view of one country: flag and name, labelled property rows in
//! two columns, and the border countries as selectable links.
//!
//! ```text
//!  ← Back (Esc)
//!
//!  🇫🇷 France
//!
//!  Native Name: --                 Top Level Domain: --
//!  Population: 67,391,582          Currencies: not exist
//!  ...
//!
//!  Border Countries: [Belgium] [Germany]
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::format::detail_properties;
use crate::core::state::{Borders, DetailRecord, DetailState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows in the left column; the rest go right.
const LEFT_COLUMN_ROWS: usize = 5;
/// Below this width both columns are stacked.
const TWO_COLUMN_MIN_WIDTH: u16 = 70;

/// Border selection for the open detail view.
#[derive(Debug, Default)]
pub struct DetailViewState {
    pub selected_border: usize,
    /// Borders drawn in the last render
    pub border_count: usize,
}

/// Events emitted by the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    Back,
    /// Open the border country at this index.
    OpenBorder(usize),
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DetailViewState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::CursorLeft | TuiEvent::CursorUp => {
                self.selected_border = self.selected_border.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown => {
                if self.border_count > 0 {
                    self.selected_border = (self.selected_border + 1).min(self.border_count - 1);
                }
                None
            }
            TuiEvent::Submit if self.border_count > 0 => Some(DetailEvent::OpenBorder(
                self.selected_border.min(self.border_count - 1),
            )),
            _ => None,
        }
    }
}

/// Wrap `label: value` to `width`, keeping the label bold on the first line.
fn property_lines(label: &str, value: &str, width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(palette.text)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(palette.muted);

    let text = format!("{label}: {value}");
    let options = textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(&text, options)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let head = label.len() + 1;
            if i == 0 && line.len() >= head && line.starts_with(label) {
                Line::from(vec![
                    Span::styled(line[..head].to_string(), label_style),
                    Span::styled(line[head..].to_string(), value_style),
                ])
            } else {
                Line::styled(line.into_owned(), value_style)
            }
        })
        .collect()
}

pub struct DetailView<'a> {
    pub state: &'a mut DetailViewState,
    pub detail: &'a DetailState,
    pub palette: Palette,
}

impl<'a> DetailView<'a> {
    pub fn new(state: &'a mut DetailViewState, detail: &'a DetailState, palette: Palette) -> Self {
        Self {
            state,
            detail,
            palette,
        }
    }

    fn border_line(&mut self) -> Line<'static> {
        let label = Span::styled(
            "Border Countries: ",
            Style::default()
                .fg(self.palette.text)
                .add_modifier(Modifier::BOLD),
        );
        let muted = Style::default().fg(self.palette.muted);
        let detail = self.detail;
        let borders = match &detail.borders {
            Borders::Fetching => {
                self.state.border_count = 0;
                return Line::from(vec![label, Span::styled("Fetching…", muted)]);
            }
            Borders::Loaded(borders) => borders,
        };
        self.state.border_count = borders.len();
        if borders.is_empty() {
            return Line::from(vec![label, Span::styled("None", muted)]);
        }
        self.state.selected_border = self.state.selected_border.min(borders.len() - 1);

        let mut spans = vec![label];
        for (i, border) in borders.iter().enumerate() {
            let style = if i == self.state.selected_border {
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(self.palette.text)
            };
            let text = if border.flag.is_empty() {
                format!("[{}]", border.name)
            } else {
                format!("[{} {}]", border.flag, border.name)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = area.inner(Margin::new(1, 0));
        let detail = self.detail;
        let palette = self.palette;
        let muted = Style::default().fg(palette.muted);

        let [back_area, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(Line::styled("← Back (Esc)", Style::default().fg(palette.accent))),
            back_area,
        );

        let country = match &detail.country {
            DetailRecord::Loading => {
                self.state.border_count = 0;
                let text = format!("Loading {}...", detail.name);
                frame.render_widget(Paragraph::new(text).style(muted), body);
                return;
            }
            DetailRecord::Missing => {
                self.state.border_count = 0;
                let text = format!("No country named \"{}\" was found.", detail.name);
                frame.render_widget(Paragraph::new(text).style(muted), body);
                return;
            }
            DetailRecord::Loaded(country) => country,
        };

        let heading = match &country.flag {
            Some(flag) => format!("{flag} {}", country.common_name()),
            None => country.common_name().to_string(),
        };
        let properties = detail_properties(country);
        let split = LEFT_COLUMN_ROWS.min(properties.len());
        let two_columns = body.width >= TWO_COLUMN_MIN_WIDTH;
        let column_width = if two_columns { body.width / 2 - 1 } else { body.width };

        let column = |rows: &[(&'static str, String)]| -> Vec<Line<'static>> {
            rows.iter()
                .flat_map(|(label, value)| property_lines(label, value, column_width, &palette))
                .collect()
        };
        let (left, right) = if two_columns {
            (column(&properties[..split]), column(&properties[split..]))
        } else {
            (column(&properties), Vec::new())
        };
        let columns_height = left.len().max(right.len()) as u16;

        let [heading_area, _, columns_area, _, borders_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(columns_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(body);

        frame.render_widget(
            Paragraph::new(Line::styled(
                heading,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            heading_area,
        );

        if two_columns {
            let [left_area, right_area] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(columns_area);
            frame.render_widget(Paragraph::new(left), left_area);
            frame.render_widget(Paragraph::new(right), right_area);
        } else {
            frame.render_widget(Paragraph::new(left), columns_area);
        }

        let borders = self.border_line();
        frame.render_widget(Paragraph::new(borders).wrap(Wrap { trim: false }), borders_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::BorderCountry;
    use crate::core::theme::ColorMode;
    use crate::test_support::{france, japan};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut DetailViewState, detail: &DetailState, width: u16) -> String {
        let backend = TestBackend::new(width, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                DetailView::new(state, detail, Palette::for_mode(ColorMode::Light))
                    .render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn loaded(record: crate::core::country::CountryRecord, borders: Borders) -> DetailState {
        DetailState {
            name: record.common_name().to_string(),
            country: DetailRecord::Loaded(Box::new(record)),
            borders,
        }
    }

    #[test]
    fn test_property_lines_wrap_and_keep_label() {
        let palette = Palette::for_mode(ColorMode::Light);
        let lines = property_lines("Languages", "English, French, and German", 20, &palette);
        assert!(lines.len() > 1);
        assert_eq!(lines[0].spans[0].content, "Languages:");
    }

    #[test]
    fn test_renders_properties() {
        let detail = loaded(japan(), Borders::Loaded(Vec::new()));
        let mut state = DetailViewState::new();
        let text = draw(&mut state, &detail, 100);

        assert!(text.contains("Japan"));
        assert!(text.contains("Native Name:"));
        assert!(text.contains("125,836,021"));
        assert!(text.contains("Sub Region: Eastern Asia"));
        assert!(text.contains("Japanese yen"));
        assert!(text.contains("Border Countries: None"));
        assert_eq!(state.border_count, 0);
    }

    #[test]
    fn test_borders_fetching_then_selectable() {
        let mut detail = loaded(france(), Borders::Fetching);
        let mut state = DetailViewState::new();
        assert!(draw(&mut state, &detail, 100).contains("Fetching…"));
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        detail.borders = Borders::Loaded(vec![
            BorderCountry {
                name: "Belgium".to_string(),
                flag: String::new(),
            },
            BorderCountry {
                name: "Germany".to_string(),
                flag: String::new(),
            },
        ]);
        let text = draw(&mut state, &detail, 100);
        assert!(text.contains("[Belgium]"));
        assert!(text.contains("[Germany]"));

        state.handle_event(&TuiEvent::CursorRight);
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DetailEvent::OpenBorder(1))
        );
    }

    #[test]
    fn test_loading_and_missing_states() {
        let mut state = DetailViewState::new();
        let detail = DetailState::new("Atlantis");
        assert!(draw(&mut state, &detail, 80).contains("Loading Atlantis..."));

        let detail = DetailState {
            name: "Atlantis".to_string(),
            country: DetailRecord::Missing,
            borders: Borders::Loaded(Vec::new()),
        };
        assert!(draw(&mut state, &detail, 80).contains("No country named \"Atlantis\""));
    }

    #[test]
    fn test_back_keys() {
        let mut state = DetailViewState::new();
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(DetailEvent::Back));
        assert_eq!(state.handle_event(&TuiEvent::Backspace), Some(DetailEvent::Back));
    }
}
