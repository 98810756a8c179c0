use eframe::egui::{self, Ui};
use egui_extras::{Size, StripBuilder};

use crate::state::AppState;
use crate::ui::{panels, plot};

/// Panels per row of the figure grid.
const GRID_COLUMNS: usize = 2;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MatchPlotApp {
    pub state: AppState,
}

impl MatchPlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MatchPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: figure grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(figure) = &self.state.figure else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open results to plot them  (File → Open…)");
                });
                return;
            };

            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(&figure.title);
            });
            ui.separator();

            let rows = figure.panels.len().div_ceil(GRID_COLUMNS);
            StripBuilder::new(ui)
                .sizes(Size::remainder(), rows)
                .vertical(|mut strip| {
                    for (r, row) in figure.panels.chunks(GRID_COLUMNS).enumerate() {
                        strip.strip(|builder| {
                            builder
                                .sizes(Size::remainder(), GRID_COLUMNS)
                                .horizontal(|mut strip| {
                                    for (c, panel) in row.iter().enumerate() {
                                        strip.cell(|ui: &mut Ui| {
                                            plot::panel_plot(ui, r * GRID_COLUMNS + c, panel);
                                        });
                                    }
                                    for _ in row.len()..GRID_COLUMNS {
                                        strip.empty();
                                    }
                                });
                        });
                    }
                });
        });
    }
}
