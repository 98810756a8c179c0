use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.figure.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export JSON…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source_path {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open matching results")
        .add_filter("Results or bag", &["hdf5", "bag"])
        .add_filter("HDF5", &["hdf5"])
        .add_filter("Bag", &["bag"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn open_folder_dialog(state: &mut AppState) {
    if let Some(dir) = rfd::FileDialog::new()
        .set_title("Open results directory")
        .pick_folder()
    {
        state.open(&dir);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export figure data")
        .add_filter("JSON", &["json"])
        .set_file_name("figure.json")
        .save_file()
    else {
        return;
    };

    if let Err(e) = state.export(&path) {
        log::error!("Failed to export: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
