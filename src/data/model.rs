use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical column names of the launch table
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// OutcomeClass – the 0/1 `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Serialized as the raw `0` / `1` class value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    pub fn value(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(class: OutcomeClass) -> u8 {
        class.value()
    }
}

impl TryFrom<u8> for OutcomeClass {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(OutcomeClass::Failure),
            1 => Ok(OutcomeClass::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: OutcomeClass,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed summary values.
///
/// Built once at start-up and shared read-only (behind an `Arc`) for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Build summary values from the loaded records.
    ///
    /// Returns `None` for an empty table, which has no payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        Some(LaunchDataset {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Full payload range of the dataset.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }

    /// Dropdown options: the "all sites" sentinel followed by every site.
    pub fn site_options(&self) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::All)
            .chain(self.sites.iter().cloned().map(SiteSelector::Site))
            .collect()
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// SiteSelector – dropdown value
// ---------------------------------------------------------------------------

/// Either every site or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Textual value of the "all sites" sentinel.
    pub const ALL_VALUE: &'static str = "ALL";

    /// Human readable label shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }

    /// Whether `record` passes this selector.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(s) => record.launch_site == *s,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{}", Self::ALL_VALUE),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive [low, high] in kg
// ---------------------------------------------------------------------------

/// Inclusive payload mass range. Callers keep `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn summary_values() {
        let ds = two_site_dataset();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.min_payload(), 500.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.sites(), ["A".to_string(), "B".to_string()]);
        assert_eq!(ds.booster_categories(), ["v1.0", "v1.1", "FT", "B4"]);
    }

    #[test]
    fn empty_table_has_no_dataset() {
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn site_options_start_with_sentinel() {
        let ds = two_site_dataset();
        let opts = ds.site_options();
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0], SiteSelector::All);
        assert_eq!(opts[0].label(), "All Sites");
        assert_eq!(opts[2], SiteSelector::Site("B".into()));
    }

    #[test]
    fn selector_matching() {
        let ds = two_site_dataset();
        let a = SiteSelector::Site("A".into());
        assert_eq!(ds.records().iter().filter(|r| a.matches(r)).count(), 4);
        assert!(ds.records().iter().all(|r| SiteSelector::All.matches(r)));
        assert_eq!(SiteSelector::All.to_string(), "ALL");
        assert_eq!(a.to_string(), "A");
    }

    #[test]
    fn range_is_inclusive() {
        let r = PayloadRange::new(1000.0, 2000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(999.9));
        assert!(!r.contains(2000.1));
    }

    #[test]
    fn outcome_class_conversions() {
        assert_eq!(OutcomeClass::try_from(1u8), Ok(OutcomeClass::Success));
        assert!(OutcomeClass::try_from(2u8).is_err());
        assert_eq!(OutcomeClass::Failure.to_string(), "0");
    }
}
