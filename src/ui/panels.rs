use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export;
use crate::data::model::{PayloadRange, SiteSelector};
use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(32.0)
                .strong()
                .color(TITLE_COLOR),
        );
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dropdown and payload slider
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch site");
    ui.separator();
    site_dropdown(ui, state);

    ui.add_space(12.0);
    ui.heading("Payload range (kg)");
    ui.separator();
    payload_slider(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let current = state.site().clone();
    let mut chosen: Option<SiteSelector> = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            chosen = site_list(ui, state);
        });

    if let Some(site) = chosen {
        select_site(state, site);
    }
}

/// Search field plus one selectable entry per matching site option.
/// Returns the entry clicked this frame.
fn site_list(ui: &mut Ui, state: &mut AppState) -> Option<SiteSelector> {
    let options = state.dataset.site_options();
    let current = state.site().clone();
    let mut chosen = None;

    ui.add(egui::TextEdit::singleline(&mut state.site_query).hint_text("Search sites…"));
    let query = state.site_query.to_lowercase();
    for opt in options {
        if !opt.label().to_lowercase().contains(&query) {
            continue;
        }
        if ui.selectable_label(current == opt, opt.label()).clicked() {
            chosen = Some(opt);
        }
    }
    chosen
}

fn select_site(state: &mut AppState, site: SiteSelector) {
    log::info!("Site selected: {site}");
    state.site_query.clear();
    state.set_site(site);
}

fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let slider = state.slider;
    let current = state.payload_range();
    let mut low = current.low;
    let mut high = current.high;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .clamping(egui::SliderClamping::Never)
                .suffix(" kg")
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .clamping(egui::SliderClamping::Never)
                .suffix(" kg")
                .text("to"),
        )
        .changed();

    if low_changed || high_changed {
        // Dragging one handle past the other pushes the other along.
        if low_changed && low > high {
            high = low;
        }
        if high_changed && high < low {
            low = high;
        }
        state.set_payload_range(slider.clamp(PayloadRange::new(low, high)));
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.weak(format!("min {} kg", state.dataset.min_payload()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.weak(format!("max {} kg", state.dataset.max_payload()));
        });
    });

    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(state.dataset.payload_bounds());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save launches in view as CSV…").clicked() {
                save_csv_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save charts as JSON…").clicked() {
                save_json_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.scatter().points.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Save dialogs
// ---------------------------------------------------------------------------

pub fn save_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save launches in view")
        .add_filter("CSV", &["csv"])
        .set_file_name("launches.csv")
        .save_file();

    if let Some(path) = file {
        let result = export::save_records_csv(&path, state.visible_records());
        report_export(state, &path, result);
    }
}

pub fn save_json_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save chart descriptions")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        let result = export::save_figures_json(&path, state.pie(), state.scatter());
        report_export(state, &path, result);
    }
}

fn report_export(state: &mut AppState, path: &std::path::Path, result: anyhow::Result<()>) {
    match result {
        Ok(()) => {
            log::info!("Exported {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
