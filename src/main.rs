use atlas::core::config::{self, CliOverrides};
use atlas::core::theme::ColorMode;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "atlas", about = "Where in the world: browse countries from the terminal")]
struct Args {
    /// Color mode to start in
    #[arg(short, long, value_enum)]
    color_mode: Option<ColorMode>,

    /// Base URL of the country service
    #[arg(long)]
    base_url: Option<String>,

    /// Region filter to start with (e.g. "Europe")
    #[arg(short, long)]
    region: Option<String>,

    /// Comma-separated country names to start with (e.g. "Japan,France")
    #[arg(short, long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("Config load failed: {}", e);
            config::AtlasConfig::default()
        }
    };

    let cli = CliOverrides {
        color_mode: args.color_mode,
        base_url: args.base_url,
        region: args.region,
        search: args.search,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Atlas starting up: source={}, location={}",
        resolved.base_url,
        resolved.start_location
    );

    atlas::tui::run(resolved)
}
