//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::nav::list_url;
use crate::core::storage::default_storage_path;
use crate::core::theme::ColorMode;
use crate::source::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub color_mode: Option<ColorMode>,
    /// Region preselected when no `--region` flag is given.
    pub default_region: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the JSON storage file, relative to `~/.atlas/` unless absolute.
    pub path: Option<String>,
}

/// Values given on the command line; `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub color_mode: Option<ColorMode>,
    pub base_url: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub color_mode: ColorMode,
    /// `None` when no home directory exists; storage is then in-memory.
    pub storage_path: Option<PathBuf>,
    pub start_location: Url,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.atlas/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas"))
}

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AtlasConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AtlasConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AtlasConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Atlas Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# color_mode = "light"               # "light" or "dark" (env: ATLAS_COLOR_MODE)
# default_region = "Europe"          # Region filter applied at startup

# [source]
# base_url = "https://restcountries.com/v3.1"   # env: ATLAS_BASE_URL

# [storage]
# path = "storage.json"              # Relative to ~/.atlas/
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AtlasConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("ATLAS_BASE_URL").ok())
        .or_else(|| config.source.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Color mode: CLI → env → config → default
    let env_color_mode = std::env::var("ATLAS_COLOR_MODE").ok().and_then(|value| {
        let parsed = ColorMode::parse(&value);
        if parsed.is_none() {
            warn!("Ignoring ATLAS_COLOR_MODE={:?}: expected light or dark", value);
        }
        parsed
    });
    let color_mode = cli
        .color_mode
        .or(env_color_mode)
        .or(config.general.color_mode)
        .unwrap_or_default();

    let storage_path = match &config.storage.path {
        Some(path) => {
            let path = PathBuf::from(path);
            if path.is_absolute() {
                Some(path)
            } else {
                config_dir().map(|d| d.join(path))
            }
        }
        None => default_storage_path(),
    };

    // Region: CLI → config; search only from CLI
    let region = cli
        .region
        .as_deref()
        .or(config.general.default_region.as_deref());
    let start_location = list_url(cli.search.as_deref(), region);

    ResolvedConfig {
        base_url,
        color_mode,
        storage_path,
        start_location,
    }
}
