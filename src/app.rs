use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, &mut self.state);
            panels::header(ui);
        });

        // ---- Left side panel: site dropdown + payload range ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: launches in view ----
        egui::TopBottomPanel::bottom("launch_table")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui: &mut Ui| {
                ui.strong(format!("Launches in view ({})", self.state.scatter().points.len()));
                let height = ui.available_height();
                table::launches_table(ui, &self.state, height);
            });

        // ---- Central panel: pie and scatter charts ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            let height = (ui.available_height() - 40.0).max(200.0);
            let state = &self.state;
            ui.columns(2, |cols: &mut [Ui]| {
                plot::success_pie(&mut cols[0], state, height);
                plot::payload_scatter(&mut cols[1], state, height);
            });
        });
    }
}
