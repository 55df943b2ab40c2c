use std::path::PathBuf;

/// File the dashboard tries to open on startup, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

pub const DASHBOARD_HEADING: &str = "SpaceX Launch Records Dashboard";

/// Startup settings. There is no config file; everything has a fixed default.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Granularity of the payload slider, in kg.
    pub payload_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_title: DASHBOARD_HEADING.to_string(),
            inner_size: [1200.0, 900.0],
            min_inner_size: [700.0, 500.0],
            payload_step: 1.0,
        }
    }
}
