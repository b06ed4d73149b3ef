use std::sync::Arc;

use crate::chart::{PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::aggregate::success_pie;
use crate::data::filter::{filtered_records, payload_scatter};
use crate::data::model::{LaunchDataset, LaunchRecord, OutcomeClass, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Callback wiring: which chart depends on which widget
// ---------------------------------------------------------------------------

/// Widget values the charts are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSlot {
    SiteSelector,
    PayloadRange,
}

/// Chart descriptions produced by the callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSlot {
    PieChart,
    ScatterChart,
}

impl InputSlot {
    /// Outputs recomputed when this input changes.
    pub fn dependents(self) -> &'static [OutputSlot] {
        match self {
            InputSlot::SiteSelector => &[OutputSlot::PieChart, OutputSlot::ScatterChart],
            InputSlot::PayloadRange => &[OutputSlot::ScatterChart],
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Launch table, loaded once at start-up and never modified.
    pub dataset: Arc<LaunchDataset>,

    /// Dropdown value.
    site: SiteSelector,

    /// Range slider value.
    payload_range: PayloadRange,

    /// Slider bounds, already fitted to the dataset.
    pub slider: SliderConfig,

    /// Current pie chart, recomputed when the site changes.
    pie: PieChart,

    /// Current scatter chart, recomputed when the site or range changes.
    scatter: ScatterChart,

    /// Colours per launch site, booster category and outcome class.
    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,
    pub outcome_colors: ColorMap,

    /// Search text typed into the site dropdown.
    pub site_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Number of callback runs, per output slot.
    recompute_counts: [usize; 2],
}

impl AppState {
    /// Initial state: all sites, full payload range, both charts computed.
    pub fn new(dataset: Arc<LaunchDataset>, slider: SliderConfig) -> Self {
        let slider = slider.fit_to(&dataset);
        let site = SiteSelector::All;
        let payload_range = dataset.payload_bounds();

        let pie = success_pie(&dataset, &site);
        let scatter = payload_scatter(&dataset, &site, payload_range);

        let site_colors = ColorMap::new(dataset.sites().iter().cloned());
        let booster_colors = ColorMap::new(dataset.booster_categories().iter().cloned());
        let outcome_colors = ColorMap::new(
            [OutcomeClass::Success, OutcomeClass::Failure].map(|c| c.to_string()),
        );

        Self {
            dataset,
            site,
            payload_range,
            slider,
            pie,
            scatter,
            site_colors,
            booster_colors,
            outcome_colors,
            site_query: String::new(),
            status_message: None,
            recompute_counts: [0; 2],
        }
    }

    pub fn site(&self) -> &SiteSelector {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    /// Records currently shown in the scatter chart.
    pub fn visible_records(&self) -> impl Iterator<Item = &LaunchRecord> {
        filtered_records(&self.dataset, &self.site, self.payload_range)
    }

    /// How many times the callback behind `output` has run since start-up.
    pub fn recompute_count(&self, output: OutputSlot) -> usize {
        self.recompute_counts[output as usize]
    }

    /// Change the dropdown value. No-op when unchanged.
    pub fn set_site(&mut self, site: SiteSelector) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.input_changed(InputSlot::SiteSelector);
    }

    /// Change the slider value. No-op when unchanged.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.input_changed(InputSlot::PayloadRange);
    }

    fn input_changed(&mut self, input: InputSlot) {
        for &output in input.dependents() {
            self.recompute(output);
        }
    }

    fn recompute(&mut self, output: OutputSlot) {
        match output {
            OutputSlot::PieChart => {
                self.pie = success_pie(&self.dataset, &self.site);
                log::debug!(
                    "pie chart #{} for {}: {} slices",
                    self.recompute_count(output) + 1,
                    self.site,
                    self.pie.slices.len()
                );
            }
            OutputSlot::ScatterChart => {
                self.scatter = payload_scatter(&self.dataset, &self.site, self.payload_range);
                log::debug!(
                    "scatter chart #{} for {} in [{}, {}] kg: {} points",
                    self.recompute_count(output) + 1,
                    self.site,
                    self.payload_range.low,
                    self.payload_range.high,
                    self.scatter.points.len()
                );
            }
        }
        self.recompute_counts[output as usize] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::two_site_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(two_site_dataset()), SliderConfig::default())
    }

    #[test]
    fn initial_state_shows_everything() {
        let st = state();
        assert_eq!(st.site(), &SiteSelector::All);
        assert_eq!(st.payload_range(), PayloadRange::new(500.0, 9600.0));
        assert_eq!(st.pie().title, "Launches per site");
        assert_eq!(st.scatter().points.len(), 6);
        assert_eq!(st.visible_records().count(), 6);
        assert_eq!(st.recompute_count(OutputSlot::PieChart), 0);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut st = state();
        st.set_site(SiteSelector::Site("B".into()));
        assert_eq!(st.recompute_count(OutputSlot::PieChart), 1);
        assert_eq!(st.recompute_count(OutputSlot::ScatterChart), 1);
        assert_eq!(st.pie().title, "Launch success in B");
        assert_eq!(st.scatter().points.len(), 2);
    }

    #[test]
    fn range_change_recomputes_only_scatter() {
        let mut st = state();
        st.set_payload_range(PayloadRange::new(2000.0, 3000.0));
        assert_eq!(st.recompute_count(OutputSlot::PieChart), 0);
        assert_eq!(st.recompute_count(OutputSlot::ScatterChart), 1);
        assert_eq!(st.scatter().points.len(), 3);
        assert_eq!(st.pie().total(), 3);
    }

    #[test]
    fn unchanged_values_trigger_nothing() {
        let mut st = state();
        st.set_site(SiteSelector::All);
        st.set_payload_range(st.payload_range());
        assert_eq!(st.recompute_count(OutputSlot::PieChart), 0);
        assert_eq!(st.recompute_count(OutputSlot::ScatterChart), 0);
    }

    #[test]
    fn range_and_site_apply_independently() {
        let mut st = state();
        st.set_payload_range(PayloadRange::new(0.0, 3000.0));
        st.set_site(SiteSelector::Site("A".into()));
        assert_eq!(st.scatter().points.len(), 3);

        // Back to all sites: the range is re-applied to the full table.
        st.set_site(SiteSelector::All);
        assert_eq!(st.scatter().points.len(), 4);
    }

    #[test]
    fn dependency_table() {
        assert_eq!(
            InputSlot::SiteSelector.dependents(),
            &[OutputSlot::PieChart, OutputSlot::ScatterChart]
        );
        assert_eq!(InputSlot::PayloadRange.dependents(), &[OutputSlot::ScatterChart]);
    }
}
