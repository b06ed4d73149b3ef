use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchRecord,
};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently in the scatter chart.
pub fn launches_table(ui: &mut Ui, state: &AppState, max_height: f32) {
    let rows: Vec<&LaunchRecord> = state.visible_records().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::remainder())
        .max_scroll_height(max_height)
        .header(20.0, |mut header| {
            for name in [COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&rec.launch_site).color(state.site_colors.color_for(&rec.launch_site)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    let class = rec.outcome.to_string();
                    ui.label(RichText::new(&class).color(state.outcome_colors.color_for(&class)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&rec.booster_version_category).color(
                        state.booster_colors.color_for(&rec.booster_version_category),
                    ));
                });
            });
        });
}
