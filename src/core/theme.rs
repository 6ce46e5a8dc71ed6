//! Light/dark color mode. The current mode is plain data on `App` and is
//! handed to components as a prop; toggling is an explicit transition.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// Parses `light`/`dark`, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ColorMode::Light),
            "dark" => Some(ColorMode::Dark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_returns() {
        assert_eq!(ColorMode::Light.toggled(), ColorMode::Dark);
        assert_eq!(ColorMode::Light.toggled().toggled(), ColorMode::Light);
    }

    #[test]
    fn test_parse() {
        assert_eq!(ColorMode::parse(" Dark "), Some(ColorMode::Dark));
        assert_eq!(ColorMode::parse("light"), Some(ColorMode::Light));
        assert_eq!(ColorMode::parse("sepia"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ColorMode,
        }
        let w: Wrapper = toml::from_str("mode = \"dark\"").unwrap();
        assert_eq!(w.mode, ColorMode::Dark);
    }
}
