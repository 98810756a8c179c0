mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod figure;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use app::MatchPlotApp;
use clap::Parser;
use cli::Args;
use config::PlotConfig;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("[ERROR] {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = PlotConfig {
        seed: args.seed,
        ..Default::default()
    };
    let figure = figure::load_figure(&args.results_path, &config)?;

    if let Some(out) = &args.export {
        std::fs::write(out, figure.to_json()?)
            .with_context(|| format!("writing {}", out.display()))?;
        log::info!("Exported figure to {}", out.display());
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let mut state = AppState::new(config);
    state.set_figure(figure, args.results_path);

    eframe::run_native(
        "Matching evaluation",
        options,
        Box::new(|_cc| Ok(Box::new(MatchPlotApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
