use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::data::model::{LaunchDataset, PayloadRange};

/// Dataset read when no path is given on the command line.
pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Payload slider bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
        }
    }
}

impl SliderConfig {
    /// Widen the bounds so every payload in `dataset` is selectable.
    pub fn fit_to(self, dataset: &LaunchDataset) -> Self {
        Self {
            min: self.min.min(dataset.min_payload()),
            max: self.max.max(dataset.max_payload()),
        }
    }

    /// Clamp both ends into the slider bounds and keep `low <= high`.
    pub fn clamp(&self, range: PayloadRange) -> PayloadRange {
        let low = range.low.clamp(self.min, self.max);
        let high = range.high.clamp(self.min, self.max);
        PayloadRange::new(low.min(high), high.max(low))
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub slider: SliderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            slider: SliderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Build from command-line arguments (program name already stripped).
    ///
    /// Accepts at most one positional argument: the dataset path.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = Self::default();

        if let Some(path) = args.next() {
            config.dataset_path = PathBuf::from(path);
        }
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{extra}' (usage: launch-dash [DATASET])");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::two_site_dataset;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_uses_default_dataset() {
        let cfg = DashboardConfig::from_args(args(&[])).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(cfg.slider, SliderConfig::default());
    }

    #[test]
    fn positional_dataset_path() {
        let cfg = DashboardConfig::from_args(args(&["data/launches.parquet"])).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("data/launches.parquet"));
    }

    #[test]
    fn extra_argument_is_rejected() {
        let err = DashboardConfig::from_args(args(&["a.csv", "b.csv"])).unwrap_err();
        assert!(err.to_string().contains("'b.csv'"));
    }

    #[test]
    fn slider_widens_to_dataset() {
        let ds = two_site_dataset();
        let narrow = SliderConfig { min: 1000.0, max: 5000.0 };
        let fitted = narrow.fit_to(&ds);
        assert_eq!(fitted, SliderConfig { min: 500.0, max: 9600.0 });

        // Already wide enough: unchanged.
        assert_eq!(SliderConfig::default().fit_to(&ds), SliderConfig::default());
    }

    #[test]
    fn clamp_orders_and_bounds_range() {
        let slider = SliderConfig::default();
        assert_eq!(
            slider.clamp(PayloadRange::new(-50.0, 20000.0)),
            PayloadRange::new(0.0, 10000.0)
        );
        assert_eq!(
            slider.clamp(PayloadRange::new(7000.0, 3000.0)),
            PayloadRange::new(3000.0, 7000.0)
        );
    }
}
