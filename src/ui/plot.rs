use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::SliceLabel;
use crate::data::model::SiteSelector;
use crate::state::AppState;

/// Largest angle drawn as one polygon; egui only fills convex shapes.
const MAX_WEDGE_STEP: f64 = FRAC_PI_2;

/// Angular resolution of the pie outline.
const ARC_RESOLUTION: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Polygon outline of the wedge from `start` to `end` (radians) of a unit
/// circle centred at the origin.
pub fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = ((end - start).abs() / ARC_RESOLUTION).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + (end - start) * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

/// Angular span `(start, end)` of each slice, clockwise from twelve o'clock.
/// Zero-valued slices get `None` and take up no angle.
pub fn slice_spans(fractions: &[f64]) -> Vec<Option<(f64, f64)>> {
    let mut start = FRAC_PI_2;
    fractions
        .iter()
        .map(|&fraction| {
            if fraction <= 0.0 {
                return None;
            }
            let end = start - fraction * TAU;
            let span = (start, end);
            start = end;
            Some(span)
        })
        .collect()
}

/// Placeholder shown instead of a pie with nothing to count.
fn empty_pie_message(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "No successful launches to show".to_string(),
        SiteSelector::Site(site) => format!("No launches recorded for {site}"),
    }
}

/// Render the success pie chart.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = state.pie();
    ui.vertical_centered(|ui: &mut Ui| ui.strong(&pie.title));

    if pie.total() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(empty_pie_message(state.site()));
        });
        return;
    }
    let fractions = pie.fractions();
    let spans = slice_spans(&fractions);

    Plot::new("success_pie")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for ((slice, fraction), span) in pie.slices.iter().zip(&fractions).zip(&spans) {
                let name = slice.label.to_string();
                let color = match &slice.label {
                    SliceLabel::Site(site) => state.site_colors.color_for(site),
                    SliceLabel::Outcome(class) => state.outcome_colors.color_for(&class.to_string()),
                };

                let Some((start, end)) = *span else {
                    // Legend entry only.
                    plot_ui.points(Points::new(PlotPoints::new(Vec::new())).name(&name).color(color));
                    continue;
                };

                let mut a = start;
                while a > end {
                    let b = (a - MAX_WEDGE_STEP).max(end);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge_points(a, b)))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    a = b;
                }

                let mid = (start + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Payload scatter chart
// ---------------------------------------------------------------------------

/// Render payload (x) vs. outcome class (y), one series per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = state.scatter();
    ui.vertical_centered(|ui: &mut Ui| ui.strong(&chart.title));

    // (category, payload, class, site) for hover lookup
    let hover_points: Vec<(String, f64, f64, String)> = chart
        .points
        .iter()
        .map(|p| {
            (
                p.booster_version_category.clone(),
                p.payload_mass_kg,
                f64::from(p.outcome.value()),
                p.launch_site.clone(),
            )
        })
        .collect();
    let span = (chart.range.high - chart.range.low).max(1.0);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .include_x(chart.range.low)
        .include_x(chart.range.high)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            let nearest = hover_points
                .iter()
                .filter(|(cat, ..)| cat == name)
                .min_by(|a, b| {
                    let da = ((a.1 - value.x) / span).powi(2) + (a.2 - value.y).powi(2);
                    let db = ((b.1 - value.x) / span).powi(2) + (b.2 - value.y).powi(2);
                    da.total_cmp(&db)
                });
            match nearest {
                Some((cat, payload, class, site)) => {
                    format!("{cat}\n{payload} kg\nclass {class}\n{site}")
                }
                None => format!("{:.0} kg\nclass {:.2}", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for category in chart.categories() {
                let points: PlotPoints = chart
                    .points_in(category)
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.value())])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });

    if chart.points.is_empty() {
        ui.weak("No launches in the selected payload range");
    }
}
