use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::color::SliceColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{PieChart, ScatterChart, pie_chart_for_index, scatter_chart_for_index};
use crate::data::loader::load_file;
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};
use crate::export::ChartExport;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Chart specs are cached and recomputed only when their inputs change:
/// the pie depends on the site, the scatter on the site and the payload range.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<LaunchDataset>>,

    /// Where `dataset` came from.
    pub source_path: Option<PathBuf>,

    /// Current dropdown selection.
    pub selection: SiteSelection,

    /// Current slider interval, always inside the dataset bounds.
    pub payload_range: PayloadRange,

    /// Slider granularity in kg.
    pub payload_step: f64,

    pub pie: Option<PieChart>,
    pub scatter: Option<ScatterChart>,

    /// Pie slice colours for the loaded catalog.
    pub slice_colors: Option<SliceColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            source_path: None,
            selection: SiteSelection::All,
            payload_range: PayloadRange::new(0.0, 0.0),
            payload_step: config.payload_step,
            pie: None,
            scatter: None,
            slice_colors: None,
            status_message: None,
        }
    }

    /// Load `path` and make it the current dataset. On failure the previous
    /// dataset stays and the error is shown in the status line.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} across sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.catalog().names().collect::<Vec<_>>()
                );
                self.set_dataset(dataset, Some(path.to_path_buf()));
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset: select ALL and the full payload range.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: Option<PathBuf>) {
        self.selection = SiteSelection::All;
        self.payload_range = dataset.bounds();
        self.slice_colors = Some(SliceColors::new(dataset.catalog().names()));
        self.dataset = Some(Arc::new(dataset));
        self.source_path = source;
        self.status_message = None;

        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Dropdown input, by raw option index.
    pub fn select_site_index(&mut self, index: usize) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match ds.catalog().resolve(index) {
            Ok(selection) => self.set_selection(selection),
            Err(e) => {
                log::error!("Rejected site selection: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Dropdown input. Both charts depend on it.
    pub fn set_selection(&mut self, selection: SiteSelection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Slider input. Clamped to the dataset bounds with `low <= high`;
    /// only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let bounds = ds.bounds();
        let low = low.clamp(bounds.low, bounds.high);
        let high = high.clamp(bounds.low, bounds.high);
        let range = PayloadRange::new(low.min(high), low.max(high));

        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    fn recompute_pie(&mut self) {
        let Some(ds) = &self.dataset else {
            self.pie = None;
            return;
        };
        let index = ds.catalog().index_of(self.selection);
        match pie_chart_for_index(ds, index) {
            Ok(chart) => {
                log::debug!("pie: {} slices, total {}", chart.slices.len(), chart.total());
                self.pie = Some(chart);
            }
            Err(e) => {
                log::error!("Pie chart failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.pie = None;
            }
        }
    }

    fn recompute_scatter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.scatter = None;
            return;
        };
        let index = ds.catalog().index_of(self.selection);
        match scatter_chart_for_index(ds, index, self.payload_range) {
            Ok(chart) => {
                log::debug!(
                    "scatter: {} points in [{}, {}]",
                    chart.points.len(),
                    self.payload_range.low,
                    self.payload_range.high
                );
                self.scatter = Some(chart);
            }
            Err(e) => {
                log::error!("Scatter chart failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.scatter = None;
            }
        }
    }

    /// Label of the current selection for the dropdown.
    pub fn selection_label(&self) -> String {
        self.dataset
            .as_ref()
            .and_then(|ds| ds.catalog().label(self.selection).ok())
            .unwrap_or_default()
            .to_string()
    }

    /// Snapshot of the current charts, if any are computed.
    pub fn chart_export(&self) -> Option<ChartExport> {
        Some(ChartExport {
            source: self.source_path.as_ref().map(|p| p.display().to_string()),
            selection: self.selection,
            site: self.selection_label(),
            payload_range: self.payload_range,
            pie: self.pie.clone()?,
            scatter: self.scatter.clone()?,
        })
    }
}
