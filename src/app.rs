use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
    heading: String,
}

impl LaunchDashboardApp {
    /// Build the app and try the configured startup file. A missing or
    /// malformed file leaves an empty dashboard with the error shown.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        if let Err(e) = state.load_path(&config.data_path) {
            log::warn!("Could not load {}: {e:#}", config.data_path.display());
        }
        Self {
            state,
            heading: config.window_title.clone(),
        }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload slider ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie + scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state, &self.heading);
        });
    }
}
