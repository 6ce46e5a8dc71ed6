//! # TitleBar Component
//!
//! Top bar with the application title, the status message and the color
//! mode switch.
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```text
//!  Where in the world | 250 countries                      ☾ dark mode (t)
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::theme::ColorMode;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const APP_TITLE: &str = "Where in the world";

pub struct TitleBar {
    pub status_message: String,
    pub color_mode: ColorMode,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(status_message: String, color_mode: ColorMode, palette: Palette) -> Self {
        Self {
            status_message,
            color_mode,
            palette,
        }
    }

    /// The switch offers the mode the user would switch *to*.
    fn switch_label(&self) -> String {
        let (icon, target) = match self.color_mode {
            ColorMode::Light => ("☾", ColorMode::Dark),
            ColorMode::Dark => ("☀", ColorMode::Light),
        };
        format!("{icon} {} mode (t) ", target.label())
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = Style::default()
            .fg(self.palette.header_fg)
            .bg(self.palette.header_bg);

        let switch = self.switch_label();
        let switch_width = switch.chars().count() as u16;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(switch_width)])
                .areas(area);

        let mut spans = vec![Span::styled(
            format!(" {APP_TITLE}"),
            base.add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(format!(" | {}", self.status_message), base));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), left);
        frame.render_widget(Paragraph::new(switch).style(base), right);
    }
}
