use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let current = dataset.catalog().index_of(state.selection);
    let mut chosen = current;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selection_label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (label, index) in dataset.catalog().options() {
                ui.selectable_value(&mut chosen, index, label);
            }
        });
    if chosen != current {
        state.select_site_index(chosen);
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg)");
    let bounds = dataset.bounds();
    let mut low = state.payload_range.low;
    let mut high = state.payload_range.high;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, bounds.low..=bounds.high)
                .step_by(state.payload_step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, bounds.low..=bounds.high)
                .step_by(state.payload_step)
                .text("max"),
        )
        .changed();

    if low_changed || high_changed {
        // Dragging one handle past the other pushes it along.
        if low_changed && low > high {
            high = low;
        } else if high_changed && high < low {
            low = high;
        }
        state.set_payload_range(low, high);
    }

    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(bounds.low, bounds.high);
    }
    ui.separator();

    // ---- Summary ----
    ui.label(format!("{} launches", dataset.len()));
    ui.label(format!("{} sites", dataset.catalog().len()));
    ui.label(format!("{} successful", dataset.success_count()));
    if let Some(scatter) = &state.scatter {
        let in_range: usize = scatter.points.iter().map(|p| p.launches).sum();
        ui.label(format!("{in_range} launches in range"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.pie.is_some() && state.scatter.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts…"))
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
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(export) = state.chart_export() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_charts.json")
        .save_file();

    if let Some(path) = file {
        match export.write_to(&path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
