use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{PieChart, ScatterChart};
use crate::data::model::{PayloadRange, SiteSelection};

/// Snapshot of both charts and the selection that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct ChartExport {
    /// File the dataset was loaded from, if known.
    pub source: Option<String>,
    pub selection: SiteSelection,
    /// Display label of `selection`.
    pub site: String,
    pub payload_range: PayloadRange,
    pub pie: PieChart,
    pub scatter: ScatterChart,
}

impl ChartExport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing chart export")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{pie_chart, scatter_chart};
    use crate::data::model::{LaunchDataset, LaunchOutcome, LaunchRecord, SiteId};
    use serde_json::Value;

    fn export() -> ChartExport {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("SiteA", 500.0, LaunchOutcome::Success),
            LaunchRecord::new("SiteA", 500.0, LaunchOutcome::Failure),
            LaunchRecord::new("SiteB", 700.0, LaunchOutcome::Success),
        ])
        .unwrap();
        ChartExport {
            source: Some("launches.csv".to_string()),
            selection: SiteSelection::All,
            site: "ALL".to_string(),
            payload_range: ds.bounds(),
            pie: pie_chart(&ds, SiteSelection::All).unwrap(),
            scatter: scatter_chart(&ds, SiteSelection::All, ds.bounds()).unwrap(),
        }
    }

    #[test]
    fn json_carries_both_charts() {
        let json: Value = serde_json::from_str(&export().to_json().unwrap()).unwrap();
        assert_eq!(json["selection"], "All");
        assert_eq!(json["site"], "ALL");
        assert_eq!(json["pie"]["kind"], "Sites");
        assert_eq!(json["pie"]["slices"][0]["name"], "SiteA");
        assert_eq!(json["pie"]["slices"][1]["value"], 1);
        assert_eq!(json["scatter"]["points"][0]["success_rate"], 0.5);
        assert_eq!(json["payload_range"]["high"], 700.0);
    }

    #[test]
    fn single_site_selection_serializes_its_id() {
        let mut export = export();
        export.selection = SiteSelection::Site(SiteId(1));
        let json: Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["selection"]["Site"], 1);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("charts.json");
        export().write_to(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Correlation success rate / payload"));
    }
}
