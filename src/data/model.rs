use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// LaunchOutcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. `class` 0 is a failure, 1 a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchOutcome {
    Failure,
    Success,
}

impl LaunchOutcome {
    /// Parse a raw `class` value (integer or float spelling).
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(LaunchOutcome::Failure)
        } else if value == 1.0 {
            Some(LaunchOutcome::Success)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            LaunchOutcome::Failure => 0,
            LaunchOutcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchOutcome::Failure => "Failure",
            LaunchOutcome::Success => "Success",
        }
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table). Unused columns are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: LaunchOutcome,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: LaunchOutcome,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadKey – exact payload value usable as a BTreeMap key
// ---------------------------------------------------------------------------

/// Payload mass wrapped with a total order so it can key a `BTreeMap`.
/// `-0.0` is folded into `0.0` so both land in one group.
#[derive(Debug, Clone, Copy)]
pub struct PayloadKey(f64);

impl PayloadKey {
    pub fn new(mass: f64) -> Self {
        PayloadKey(mass + 0.0)
    }

    pub fn mass(self) -> f64 {
        self.0
    }
}

impl PartialEq for PayloadKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PayloadKey {}

impl PartialOrd for PayloadKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PayloadKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0 + 0.0).total_cmp(&(other.0 + 0.0))
    }
}

// ---------------------------------------------------------------------------
// Site catalog
// ---------------------------------------------------------------------------

/// Stable identifier of a launch site inside a [`SiteCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SiteId(pub usize);

/// Which sites the charts look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(SiteId),
}

/// Label used for the "every site" dropdown entry.
pub const ALL_SITES_LABEL: &str = "ALL";

/// Distinct launch sites in first-seen order, plus the ALL sentinel at index N.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    names: Vec<String>,
    ids: HashMap<String, SiteId>,
}

impl SiteCatalog {
    /// Build the catalog from site names, keeping first-seen order.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut catalog = SiteCatalog::default();
        for name in names {
            if !catalog.ids.contains_key(name) {
                let id = SiteId(catalog.names.len());
                catalog.ids.insert(name.to_string(), id);
                catalog.names.push(name.to_string());
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Dropdown index standing for "ALL sites".
    pub fn all_index(&self) -> usize {
        self.names.len()
    }

    /// Map a dropdown index onto a selection, rejecting anything past the sentinel.
    pub fn resolve(&self, index: usize) -> Result<SiteSelection, DashboardError> {
        match index.cmp(&self.all_index()) {
            Ordering::Less => Ok(SiteSelection::Site(SiteId(index))),
            Ordering::Equal => Ok(SiteSelection::All),
            Ordering::Greater => Err(DashboardError::UnknownSite {
                index,
                available: self.names.len(),
            }),
        }
    }

    /// Inverse of [`resolve`](Self::resolve).
    pub fn index_of(&self, selection: SiteSelection) -> usize {
        match selection {
            SiteSelection::All => self.all_index(),
            SiteSelection::Site(SiteId(i)) => i,
        }
    }

    pub fn name(&self, id: SiteId) -> Result<&str, DashboardError> {
        self.names
            .get(id.0)
            .map(String::as_str)
            .ok_or(DashboardError::UnknownSite {
                index: id.0,
                available: self.names.len(),
            })
    }

    pub fn id_of(&self, name: &str) -> Option<SiteId> {
        self.ids.get(name).copied()
    }

    /// Site names in catalog order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Dropdown options: every site in catalog order, then ALL.
    pub fn options(&self) -> Vec<(String, usize)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .chain(std::iter::once((ALL_SITES_LABEL.to_string(), self.all_index())))
            .collect()
    }

    /// Human-readable label of a selection.
    pub fn label(&self, selection: SiteSelection) -> Result<&str, DashboardError> {
        match selection {
            SiteSelection::All => Ok(ALL_SITES_LABEL),
            SiteSelection::Site(id) => self.name(id),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive slider interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable dataset with its site catalog and payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    catalog: SiteCatalog,
    bounds: PayloadRange,
}

impl LaunchDataset {
    /// Build the catalog and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DashboardError> {
        if records.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }

        let catalog = SiteCatalog::from_names(records.iter().map(|r| r.launch_site.as_str()));

        let (min, max) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg)),
        );

        Ok(LaunchDataset {
            records,
            catalog,
            bounds: PayloadRange::new(min, max),
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    /// Global payload (min, max); the slider's bounds.
    pub fn bounds(&self) -> PayloadRange {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Total number of successful launches across all sites.
    pub fn success_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == LaunchOutcome::Success)
            .count()
    }

    /// Does `record` belong to the selected site(s)?
    pub fn matches_site(&self, record: &LaunchRecord, selection: SiteSelection) -> bool {
        match selection {
            SiteSelection::All => true,
            SiteSelection::Site(id) => self.catalog.id_of(&record.launch_site) == Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("SiteB", 700.0, LaunchOutcome::Success),
            LaunchRecord::new("SiteA", 500.0, LaunchOutcome::Success),
            LaunchRecord::new("SiteA", 500.0, LaunchOutcome::Failure),
            LaunchRecord::new("SiteC", 9600.0, LaunchOutcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn catalog_keeps_first_seen_order() {
        let ds = sample();
        let names: Vec<&str> = ds.catalog().names().collect();
        assert_eq!(names, vec!["SiteB", "SiteA", "SiteC"]);
        assert_eq!(ds.catalog().id_of("SiteA"), Some(SiteId(1)));
        assert_eq!(ds.catalog().all_index(), 3);
    }

    #[test]
    fn options_end_with_all_sentinel() {
        let ds = sample();
        let options = ds.catalog().options();
        assert_eq!(options.len(), 4);
        assert_eq!(options.last(), Some(&("ALL".to_string(), 3)));
        assert_eq!(options[0], ("SiteB".to_string(), 0));
    }

    #[test]
    fn resolve_checks_bounds() {
        let catalog = sample().catalog().clone();
        assert_eq!(catalog.resolve(0), Ok(SiteSelection::Site(SiteId(0))));
        assert_eq!(catalog.resolve(3), Ok(SiteSelection::All));
        assert_eq!(
            catalog.resolve(4),
            Err(DashboardError::UnknownSite { index: 4, available: 3 })
        );
        assert!(catalog.name(SiteId(7)).is_err());
        assert_eq!(catalog.index_of(SiteSelection::All), 3);
    }

    #[test]
    fn bounds_are_global_min_max() {
        let ds = sample();
        assert_eq!(ds.bounds(), PayloadRange::new(500.0, 9600.0));
        assert_eq!(ds.success_count(), 2);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(
            LaunchDataset::from_records(Vec::new()).unwrap_err(),
            DashboardError::EmptyDataset
        );
    }

    #[test]
    fn outcome_from_class() {
        assert_eq!(LaunchOutcome::from_class(1.0), Some(LaunchOutcome::Success));
        assert_eq!(LaunchOutcome::from_class(0.0), Some(LaunchOutcome::Failure));
        assert_eq!(LaunchOutcome::from_class(0.5), None);
        assert_eq!(LaunchOutcome::Success.class(), 1);
    }

    #[test]
    fn range_is_inclusive() {
        let range = PayloadRange::new(500.0, 700.0);
        assert!(range.contains(500.0));
        assert!(range.contains(700.0));
        assert!(!range.contains(700.5));
    }
}
