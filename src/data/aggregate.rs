use crate::chart::{PieChart, PieSlice, SliceLabel};

use super::model::{LaunchDataset, OutcomeClass, SiteSelector};

// ---------------------------------------------------------------------------
// Site aggregator: site selector → pie chart description
// ---------------------------------------------------------------------------

/// Build the success pie chart for the selected site.
///
/// * `All` → one slice per site holding the *sum* of the class column for
///   that site, i.e. its number of successful launches. Sites without a
///   success keep a zero slice.
/// * `Site(s)` → one slice per outcome class present at `s` holding the
///   *row count* for that class, largest first.
///
/// An unknown site yields an empty slice set.
pub fn success_pie(dataset: &LaunchDataset, selected: &SiteSelector) -> PieChart {
    match selected {
        SiteSelector::All => PieChart {
            title: "Launches per site".to_string(),
            slices: successes_per_site(dataset),
        },
        SiteSelector::Site(site) => PieChart {
            title: format!("Launch success in {site}"),
            slices: outcome_counts(dataset, site),
        },
    }
}

fn successes_per_site(dataset: &LaunchDataset) -> Vec<PieSlice> {
    dataset
        .sites()
        .iter()
        .map(|site| {
            let value = dataset
                .records()
                .iter()
                .filter(|r| r.launch_site == *site)
                .map(|r| u64::from(r.outcome.value()))
                .sum();
            PieSlice {
                label: SliceLabel::Site(site.clone()),
                value,
            }
        })
        .collect()
}

fn outcome_counts(dataset: &LaunchDataset, site: &str) -> Vec<PieSlice> {
    // (class, count) in order of first appearance
    let mut counts: Vec<(OutcomeClass, u64)> = Vec::new();
    for rec in dataset.records().iter().filter(|r| r.launch_site == site) {
        match counts.iter_mut().find(|(c, _)| *c == rec.outcome) {
            Some((_, n)) => *n += 1,
            None => counts.push((rec.outcome, 1)),
        }
    }

    if counts.is_empty() {
        log::warn!("No launches recorded for site '{site}'");
    }

    // Stable sort keeps first-appearance order for ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(class, value)| PieSlice {
            label: SliceLabel::Outcome(class),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::*;
    use crate::data::model::LaunchDataset;

    fn labels(pie: &PieChart) -> Vec<String> {
        pie.slices.iter().map(|s| s.label.to_string()).collect()
    }

    #[test]
    fn all_sites_sums_class_column() {
        let ds = two_site_dataset();
        let pie = success_pie(&ds, &SiteSelector::All);
        assert_eq!(pie.title, "Launches per site");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: SliceLabel::Site("A".into()), value: 3 },
                PieSlice { label: SliceLabel::Site("B".into()), value: 0 },
            ]
        );
    }

    #[test]
    fn all_sites_covers_every_site_once() {
        let ds = two_site_dataset();
        let pie = success_pie(&ds, &SiteSelector::All);
        assert_eq!(labels(&pie), ds.sites());

        let class_sum: u64 = ds.records().iter().map(|r| u64::from(r.outcome.value())).sum();
        assert_eq!(pie.total(), class_sum);
    }

    #[test]
    fn single_site_counts_rows_per_class() {
        let ds = two_site_dataset();
        let pie = success_pie(&ds, &SiteSelector::Site("A".into()));
        assert_eq!(pie.title, "Launch success in A");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: SliceLabel::Outcome(OutcomeClass::Success), value: 3 },
                PieSlice { label: SliceLabel::Outcome(OutcomeClass::Failure), value: 1 },
            ]
        );
    }

    #[test]
    fn single_site_total_is_row_count() {
        let ds = two_site_dataset();
        for site in ds.sites() {
            let pie = success_pie(&ds, &SiteSelector::Site(site.clone()));
            let rows = ds.records().iter().filter(|r| r.launch_site == *site).count() as u64;
            assert_eq!(pie.total(), rows);
            assert!(pie
                .slices
                .iter()
                .all(|s| matches!(s.label, SliceLabel::Outcome(_))));
        }
    }

    #[test]
    fn failures_only_site_has_single_slice() {
        let ds = two_site_dataset();
        let pie = success_pie(&ds, &SiteSelector::Site("B".into()));
        assert_eq!(
            pie.slices,
            vec![PieSlice { label: SliceLabel::Outcome(OutcomeClass::Failure), value: 2 }]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        let ds = LaunchDataset::from_records(vec![
            record("C", 1.0, OutcomeClass::Failure, "FT"),
            record("C", 2.0, OutcomeClass::Success, "FT"),
        ])
        .unwrap();
        let pie = success_pie(&ds, &SiteSelector::Site("C".into()));
        assert_eq!(labels(&pie), vec!["0", "1"]);
    }

    #[test]
    fn unknown_site_is_empty() {
        let ds = two_site_dataset();
        let pie = success_pie(&ds, &SiteSelector::Site("Boca Chica".into()));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.title, "Launch success in Boca Chica");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let ds = two_site_dataset();
        let sel = SiteSelector::Site("A".into());
        assert_eq!(success_pie(&ds, &sel), success_pie(&ds, &sel));
        assert_eq!(
            success_pie(&ds, &SiteSelector::All),
            success_pie(&ds, &SiteSelector::All)
        );
    }
}
