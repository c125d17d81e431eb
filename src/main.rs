#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

// Application shell and frame loop
mod app;

// Persisted configuration
mod config;

// Application constants
mod constants;

// Polars-based data handling
mod data;

// Error handling
mod error;

// Frame timing and profiler hookup
mod perf;

// Range selection model
mod range;

// Application state modules
mod state;

// Panels
mod ui;

// Custom widgets
mod widgets;

use app::PriceRange;
use config::AppConfig;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = perf::start_puffin_server();

    let config = AppConfig::load_or_default(&AppConfig::default_path()).unwrap_or_else(|e| {
        log::warn!("Ignoring configuration: {}", e.user_message());
        AppConfig::default()
    });

    let mut app = PriceRange::new(config);
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        if let Err(e) = app.load_file(path) {
            app.report(e);
        }
    }

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Price Range",
        options,
        Box::new(|_| Ok(Box::new(app))),
    )
}
