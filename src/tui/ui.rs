use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::country::Dataset;
use crate::core::state::{App, View};
use crate::tui::component::Component;
use crate::tui::components::{
    CountryGrid, DetailView, FilterBar, GridItems, RegionPicker, SearchPicker, TitleBar,
};
use crate::tui::palette::Palette;
use crate::tui::{Overlay, TuiState};

const LIST_HELP: &str =
    " ←↑↓→ Move  Enter Open  / Search  r Region  t Theme  q Quit ";
const DETAIL_HELP: &str = " ←→ Border  Enter Open  Esc Back  t Theme  q Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = Palette::for_mode(app.color_mode);
    frame.render_widget(
        Block::default().style(Style::default().fg(palette.text)),
        frame.area(),
    );

    let [title_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let mut title_bar = TitleBar::new(app.status_message.clone(), app.color_mode, palette);
    title_bar.render(frame, title_area);

    let help = match &app.view {
        View::List => LIST_HELP,
        View::Detail(_) => DETAIL_HELP,
    };
    frame.render_widget(
        Paragraph::new(Line::styled(help, Style::default().fg(palette.muted))),
        help_area,
    );

    match &app.view {
        View::List => {
            let [_, filter_area, _, grid_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(main_area);

            let mut filter_bar = FilterBar {
                search: &app.nav.filter.search,
                region: &app.nav.filter.current_region,
                is_loading: !app.dataset.is_loaded(),
                palette,
            };
            filter_bar.render(frame, filter_area);

            let derived = app.derived();
            let items = match &app.dataset {
                Dataset::Placeholder(n) => GridItems::Skeleton(*n),
                Dataset::Loaded(_) => GridItems::Countries(&derived.countries),
            };
            CountryGrid::new(&mut tui.grid, items, palette).render(frame, grid_area);
        }
        View::Detail(detail) => {
            let [_, detail_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(main_area);
            DetailView::new(&mut tui.detail, detail, palette).render(frame, detail_area);
        }
    }

    match &mut tui.overlay {
        Some(Overlay::Search(state)) => {
            SearchPicker::new(state, palette).render(frame, frame.area());
        }
        Some(Overlay::Region(state)) => {
            RegionPicker::new(state, &app.nav.filter.current_region, palette)
                .render(frame, frame.area());
        }
        None => {}
    }
}
