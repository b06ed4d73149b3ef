use std::fmt;

use serde::Serialize;

use crate::data::model::{LaunchRecord, OutcomeClass, PayloadRange};

// ---------------------------------------------------------------------------
// Chart descriptions handed from the data layer to the renderer
// ---------------------------------------------------------------------------

/// Name of a pie slice: a launch site, or an outcome class when a single
/// site is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SliceLabel {
    Site(String),
    Outcome(OutcomeClass),
}

impl fmt::Display for SliceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceLabel::Site(s) => write!(f, "{s}"),
            SliceLabel::Outcome(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: SliceLabel,
    pub value: u64,
}

/// Proportion chart: one slice per label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the total held by each slice, in slice order.
    /// All zeros when the total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total == 0 {
                    0.0
                } else {
                    s.value as f64 / total as f64
                }
            })
            .collect()
    }
}

/// One marker of the payload scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: OutcomeClass,
    pub booster_version_category: String,
    pub launch_site: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
            launch_site: rec.launch_site.clone(),
        }
    }
}

/// Payload (x) vs. outcome class (y), coloured by booster category with the
/// launch site as hover text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub range: PayloadRange,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color_by: &'static str,
    pub hover: &'static str,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Booster categories present in the chart, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.points {
            if !out.contains(&p.booster_version_category.as_str()) {
                out.push(&p.booster_version_category);
            }
        }
        out
    }

    /// Points belonging to one booster category.
    pub fn points_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ScatterPoint> {
        self.points
            .iter()
            .filter(move |p| p.booster_version_category == category)
    }
}

/// Both chart descriptions, as written by the JSON export.
#[derive(Debug, Serialize)]
pub struct Figures<'a> {
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}
