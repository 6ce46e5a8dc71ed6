//! # FilterBar Component
//!
//! One line summarising the active filters. While the dataset is loading the
//! search control is drawn as a skeleton.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::country::{RegionOption, SearchOption};
use crate::core::format::format_list;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const SKELETON: &str = "░░░░░░░░░░░░░░░░";

pub struct FilterBar<'a> {
    pub search: &'a [SearchOption],
    pub region: &'a RegionOption,
    pub is_loading: bool,
    pub palette: Palette,
}

impl Component for FilterBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(self.palette.muted);
        let value = Style::default()
            .fg(self.palette.text)
            .add_modifier(Modifier::BOLD);
        let key = Style::default().fg(self.palette.accent);

        let region_text = format!("Region: {} ", self.region.label);
        let region_width = (region_text.chars().count() + 4) as u16;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(region_width)])
                .areas(area);

        let search_spans = if self.is_loading {
            vec![
                Span::styled(" Search: ", label),
                Span::styled(SKELETON, Style::default().fg(self.palette.skeleton)),
            ]
        } else if self.search.is_empty() {
            vec![
                Span::styled(" Search for a country... ", label),
                Span::styled("(/)", key),
            ]
        } else {
            let names: Vec<&str> = self.search.iter().map(|o| o.name.as_str()).collect();
            vec![
                Span::styled(" Search: ", label),
                Span::styled(format_list(&names), value),
                Span::styled(" (/)", key),
            ]
        };
        frame.render_widget(Paragraph::new(Line::from(search_spans)), left);

        let region_spans = vec![
            Span::styled("Region: ", label),
            Span::styled(self.region.label.as_str(), value),
            Span::styled(" (r)", key),
        ];
        frame.render_widget(Paragraph::new(Line::from(region_spans)), right);
    }
}
