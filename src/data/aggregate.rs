use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{filtered_indices, site_indices};
use super::model::{LaunchDataset, LaunchOutcome, PayloadKey, PayloadRange, SiteSelection};
use crate::error::DashboardError;

pub const ALL_SITES_PIE_TITLE: &str = "Number of successful launches for each launch site";
pub const SCATTER_TITLE: &str = "Correlation success rate / payload";
pub const PAYLOAD_AXIS: &str = "Payload Mass (kg)";
pub const SUCCESS_RATE_AXIS: &str = "success_rate";

/// Donut hole as a fraction of the pie radius.
pub const PIE_HOLE: f32 = 0.3;

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// What the slices of a [`PieChart`] stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PieKind {
    /// One slice per launch site (ALL selection).
    Sites,
    /// Failure / Success counts for a single site.
    Outcomes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: usize,
}

/// Labelled pie chart: one slice per site (ALL) or per outcome (single site).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub kind: PieKind,
    pub slices: Vec<PieSlice>,
    pub hole: f32,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub success_rate: f64,
    /// Number of launches sharing this exact payload mass.
    pub launches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Pie aggregator
// ---------------------------------------------------------------------------

/// Success count per site for ALL, or Failure/Success counts for one site.
pub fn pie_chart(
    dataset: &LaunchDataset,
    selection: SiteSelection,
) -> Result<PieChart, DashboardError> {
    match selection {
        SiteSelection::All => {
            // Grouped by site name, as the slices are listed alphabetically.
            let mut per_site: BTreeMap<&str, usize> = BTreeMap::new();
            for record in dataset.records() {
                *per_site.entry(record.launch_site.as_str()).or_default() +=
                    usize::from(record.outcome.class());
            }

            Ok(PieChart {
                title: ALL_SITES_PIE_TITLE.to_string(),
                kind: PieKind::Sites,
                slices: per_site
                    .into_iter()
                    .map(|(name, value)| PieSlice {
                        name: name.to_string(),
                        value,
                    })
                    .collect(),
                hole: PIE_HOLE,
            })
        }
        SiteSelection::Site(id) => {
            let name = dataset.catalog().name(id)?;

            let mut per_outcome: BTreeMap<LaunchOutcome, usize> = BTreeMap::new();
            for i in site_indices(dataset, selection) {
                *per_outcome.entry(dataset.records()[i].outcome).or_default() += 1;
            }

            Ok(PieChart {
                title: format!(
                    "Number of successful / failed launches for launch site {name}"
                ),
                kind: PieKind::Outcomes,
                slices: per_outcome
                    .into_iter()
                    .map(|(outcome, value)| PieSlice {
                        name: outcome.label().to_string(),
                        value,
                    })
                    .collect(),
                hole: PIE_HOLE,
            })
        }
    }
}

/// [`pie_chart`] driven by a raw dropdown index.
pub fn pie_chart_for_index(
    dataset: &LaunchDataset,
    index: usize,
) -> Result<PieChart, DashboardError> {
    let selection = dataset.catalog().resolve(index)?;
    pie_chart(dataset, selection)
}

// ---------------------------------------------------------------------------
// Scatter aggregator
// ---------------------------------------------------------------------------

/// Mean success rate per exact payload mass, inside `range` and the site filter.
///
/// Payloads are grouped by value, not binned, so most points stand for a
/// single launch unless masses repeat exactly.
pub fn scatter_chart(
    dataset: &LaunchDataset,
    selection: SiteSelection,
    range: PayloadRange,
) -> Result<ScatterChart, DashboardError> {
    if let SiteSelection::Site(id) = selection {
        dataset.catalog().name(id)?;
    }

    // payload → (successes, launches)
    let mut groups: BTreeMap<PayloadKey, (usize, usize)> = BTreeMap::new();
    for i in filtered_indices(dataset, selection, range) {
        let record = &dataset.records()[i];
        let entry = groups.entry(PayloadKey::new(record.payload_mass_kg)).or_default();
        entry.0 += usize::from(record.outcome.class());
        entry.1 += 1;
    }

    let points = groups
        .into_iter()
        .map(|(key, (successes, launches))| ScatterPoint {
            payload_mass_kg: key.mass(),
            success_rate: successes as f64 / launches as f64,
            launches,
        })
        .collect();

    Ok(ScatterChart {
        title: SCATTER_TITLE.to_string(),
        x_label: PAYLOAD_AXIS.to_string(),
        y_label: SUCCESS_RATE_AXIS.to_string(),
        points,
    })
}

/// [`scatter_chart`] driven by a raw dropdown index.
pub fn scatter_chart_for_index(
    dataset: &LaunchDataset,
    index: usize,
    range: PayloadRange,
) -> Result<ScatterChart, DashboardError> {
    let selection = dataset.catalog().resolve(index)?;
    scatter_chart(dataset, selection, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, SiteId};

    fn record(site: &str, mass: f64, class: u8) -> LaunchRecord {
        let outcome = if class == 1 {
            LaunchOutcome::Success
        } else {
            LaunchOutcome::Failure
        };
        LaunchRecord::new(site, mass, outcome)
    }

    fn tiny() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("SiteA", 500.0, 1),
            record("SiteA", 500.0, 0),
            record("SiteB", 700.0, 1),
        ])
        .unwrap()
    }

    fn larger() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, 0),
            record("CCAFS LC-40", 525.0, 0),
            record("VAFB SLC-4E", 500.0, 0),
            record("KSC LC-39A", 2490.0, 1),
            record("KSC LC-39A", 5300.0, 1),
            record("CCAFS LC-40", 2490.0, 0),
            record("KSC LC-39A", 3310.0, 0),
            record("VAFB SLC-4E", 9600.0, 1),
            record("CCAFS SLC-40", 1952.0, 1),
            record("CCAFS LC-40", 3170.0, 1),
        ])
        .unwrap()
    }

    fn pairs(chart: &PieChart) -> Vec<(&str, usize)> {
        chart
            .slices
            .iter()
            .map(|s| (s.name.as_str(), s.value))
            .collect()
    }

    #[test]
    fn worked_example() {
        let ds = tiny();

        let all = pie_chart(&ds, SiteSelection::All).unwrap();
        assert_eq!(pairs(&all), vec![("SiteA", 1), ("SiteB", 1)]);
        assert_eq!(all.title, ALL_SITES_PIE_TITLE);

        let site_a = pie_chart_for_index(&ds, 0).unwrap();
        assert_eq!(pairs(&site_a), vec![("Failure", 1), ("Success", 1)]);
        assert_eq!(
            site_a.title,
            "Number of successful / failed launches for launch site SiteA"
        );

        let range = PayloadRange::new(0.0, 1000.0);
        let scatter = scatter_chart(&ds, SiteSelection::All, range).unwrap();
        let points: Vec<(f64, f64)> = scatter
            .points
            .iter()
            .map(|p| (p.payload_mass_kg, p.success_rate))
            .collect();
        assert_eq!(points, vec![(500.0, 0.5), (700.0, 1.0)]);
        assert_eq!(scatter.points[0].launches, 2);
    }

    #[test]
    fn negative_zero_payload_shares_a_point() {
        let ds = LaunchDataset::from_records(vec![
            record("SiteA", 0.0, 1),
            record("SiteA", -0.0, 0),
        ])
        .unwrap();
        let chart = scatter_chart(&ds, SiteSelection::All, ds.bounds()).unwrap();
        assert_eq!(chart.points.len(), 1);
        let point = &chart.points[0];
        assert!(point.payload_mass_kg == 0.0 && point.payload_mass_kg.is_sign_positive());
        assert_eq!(point.success_rate, 0.5);
        assert_eq!(point.launches, 2);
    }

    #[test]
    fn pie_kind_follows_selection() {
        let ds = tiny();
        assert_eq!(pie_chart(&ds, SiteSelection::All).unwrap().kind, PieKind::Sites);
        assert_eq!(pie_chart_for_index(&ds, 1).unwrap().kind, PieKind::Outcomes);
    }

    #[test]
    fn all_pie_sums_to_total_successes() {
        let ds = larger();
        let chart = pie_chart_for_index(&ds, ds.catalog().all_index()).unwrap();
        assert_eq!(chart.total(), ds.success_count());
        assert_eq!(chart.slices.len(), ds.catalog().len());
    }

    #[test]
    fn all_pie_keeps_zero_success_sites() {
        let ds = LaunchDataset::from_records(vec![
            record("SiteA", 100.0, 0),
            record("SiteB", 200.0, 1),
        ])
        .unwrap();
        let chart = pie_chart(&ds, SiteSelection::All).unwrap();
        assert_eq!(pairs(&chart), vec![("SiteA", 0), ("SiteB", 1)]);
    }

    #[test]
    fn site_pie_sums_to_site_record_count() {
        let ds = larger();
        for (name, index) in ds.catalog().options() {
            if index == ds.catalog().all_index() {
                continue;
            }
            let chart = pie_chart_for_index(&ds, index).unwrap();
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.launch_site == name)
                .count();
            assert_eq!(chart.total(), expected, "site {name}");
            assert!(chart
                .slices
                .iter()
                .all(|s| s.name == "Failure" || s.name == "Success"));
        }
    }

    #[test]
    fn site_pie_only_lists_present_outcomes() {
        let ds = larger();
        let id = ds.catalog().id_of("CCAFS SLC-40").unwrap();
        let chart = pie_chart(&ds, SiteSelection::Site(id)).unwrap();
        assert_eq!(pairs(&chart), vec![("Success", 1)]);
    }

    #[test]
    fn scatter_one_point_per_distinct_mass() {
        let ds = larger();
        let chart = scatter_chart(&ds, SiteSelection::All, ds.bounds()).unwrap();
        // 2490 appears twice (one success, one failure)
        assert_eq!(chart.points.len(), ds.len() - 1);
        let shared = chart
            .points
            .iter()
            .find(|p| p.payload_mass_kg == 2490.0)
            .unwrap();
        assert_eq!(shared.success_rate, 0.5);
        assert_eq!(shared.launches, 2);
        assert!(chart
            .points
            .windows(2)
            .all(|w| w[0].payload_mass_kg < w[1].payload_mass_kg));
    }

    #[test]
    fn narrowing_range_drops_only_outside_points() {
        let ds = larger();
        let full = scatter_chart(&ds, SiteSelection::All, ds.bounds()).unwrap();
        let range = PayloadRange::new(500.0, 3310.0);
        let narrow = scatter_chart(&ds, SiteSelection::All, range).unwrap();

        let expected: Vec<&ScatterPoint> = full
            .points
            .iter()
            .filter(|p| range.contains(p.payload_mass_kg))
            .collect();
        let actual: Vec<&ScatterPoint> = narrow.points.iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn scatter_respects_site_filter() {
        let ds = larger();
        let id = ds.catalog().id_of("KSC LC-39A").unwrap();
        let chart = scatter_chart(&ds, SiteSelection::Site(id), ds.bounds()).unwrap();
        let xs: Vec<f64> = chart.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(xs, vec![2490.0, 3310.0, 5300.0]);
        assert_eq!(chart.points[0].success_rate, 1.0);
        assert_eq!(chart.title, SCATTER_TITLE);
    }

    #[test]
    fn unknown_index_is_an_error() {
        let ds = tiny();
        let past = ds.catalog().all_index() + 1;
        assert_eq!(
            pie_chart_for_index(&ds, past).unwrap_err(),
            DashboardError::UnknownSite { index: past, available: 2 }
        );
        assert!(scatter_chart_for_index(&ds, past, ds.bounds()).is_err());
        assert!(pie_chart(&ds, SiteSelection::Site(SiteId(9))).is_err());
        assert!(scatter_chart(&ds, SiteSelection::Site(SiteId(9)), ds.bounds()).is_err());
    }
}
