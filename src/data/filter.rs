use crate::chart::{ScatterChart, ScatterPoint};

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchDataset,
    LaunchRecord, PayloadRange, SiteSelector,
};

// ---------------------------------------------------------------------------
// Payload filter: site selector + payload range → scatter chart description
// ---------------------------------------------------------------------------

/// Records passing both predicates, in dataset order.
///
/// A record passes when:
/// * `range.low <= payload_mass_kg <= range.high`, and
/// * the selector is `All`, or the record's site equals the selected one.
///
/// Always runs over the full dataset; no state carries over between calls.
pub fn filtered_records<'a>(
    dataset: &'a LaunchDataset,
    selected: &'a SiteSelector,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |r| range.contains(r.payload_mass_kg))
        .filter(move |r| selected.matches(r))
}

/// Build the payload-vs-outcome scatter chart.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    selected: &SiteSelector,
    range: PayloadRange,
) -> ScatterChart {
    let points: Vec<ScatterPoint> = filtered_records(dataset, selected, range)
        .map(ScatterPoint::from)
        .collect();

    ScatterChart {
        title: format!(
            "Launch outcome by payload mass between {} kg and {} kg",
            range.low, range.high
        ),
        range,
        x_label: COL_PAYLOAD_MASS,
        y_label: COL_CLASS,
        color_by: COL_BOOSTER_CATEGORY,
        hover: COL_LAUNCH_SITE,
        points,
    }
}
