use super::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Record predicates → indices into the dataset
// ---------------------------------------------------------------------------

/// Indices of records belonging to the selected site(s).
pub fn site_indices(dataset: &LaunchDataset, selection: SiteSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| dataset.matches_site(r, selection))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of records whose payload lies inside `range` (inclusive).
pub fn indices_in_range(dataset: &LaunchDataset, range: PayloadRange) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// Indices passing both the payload range and the site filter.
///
/// The range is applied first, then the site, matching the scatter chart.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selection: SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    indices_in_range(dataset, range)
        .into_iter()
        .filter(|&i| dataset.matches_site(&dataset.records()[i], selection))
        .collect()
}
