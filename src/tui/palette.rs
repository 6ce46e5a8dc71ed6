//! Terminal colors for each color mode.

use ratatui::style::Color;

use crate::core::theme::ColorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub group_fg: Color,
    pub group_bg: Color,
    pub skeleton: Color,
}

impl Palette {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self {
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                border: Color::Gray,
                header_fg: Color::White,
                header_bg: Color::Blue,
                group_fg: Color::Blue,
                group_bg: Color::Rgb(219, 234, 254),
                skeleton: Color::Gray,
            },
            ColorMode::Dark => Self {
                text: Color::White,
                muted: Color::Gray,
                accent: Color::LightBlue,
                border: Color::DarkGray,
                header_fg: Color::White,
                header_bg: Color::Rgb(30, 41, 59),
                group_fg: Color::LightBlue,
                group_bg: Color::Rgb(23, 37, 84),
                skeleton: Color::DarkGray,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_differ() {
        assert_ne!(
            Palette::for_mode(ColorMode::Light),
            Palette::for_mode(ColorMode::Dark)
        );
    }
}
