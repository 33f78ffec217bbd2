mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::DashboardApp;
use config::{DATA_DIR_ENV, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let config = DashboardConfig::resolve(config_path.as_deref(), data_dir)?;

    // Nothing to show without data: a load failure stops startup.
    let table = data::loader::load_sources(&config)
        .inspect_err(|e| log::error!("Failed to load complaint data: {e}"))
        .context("loading complaint data")?;
    if table.is_empty() {
        log::warn!("Configured sources contain no complaints");
    }
    let state = AppState::new(table, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de Reclamações - RECLAME AQUI",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
