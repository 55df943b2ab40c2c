use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchOutcome, LaunchRecord};
use crate::error::DashboardError;

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Every format must provide the `Launch Site`, `Payload Mass (kg)` and
/// `class` columns; anything else is ignored.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, "class": 1 }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" | "txt" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("building dataset from {}", path.display()))?;
    Ok(dataset)
}

/// Validate one row's raw values into a [`LaunchRecord`].
fn build_record(
    row: usize,
    site: &str,
    payload: f64,
    class: f64,
) -> std::result::Result<LaunchRecord, DashboardError> {
    if !payload.is_finite() {
        return Err(DashboardError::InvalidPayload {
            row,
            value: payload.to_string(),
        });
    }
    let outcome = LaunchOutcome::from_class(class).ok_or(DashboardError::InvalidClass {
        row,
        value: class.to_string(),
    })?;
    Ok(LaunchRecord::new(site, payload, outcome))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_csv(file)
}

/// Parse CSV launch records from any reader.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let site = record.get(site_idx).unwrap_or("");
        let payload_raw = record.get(payload_idx).unwrap_or("");
        let class_raw = record.get(class_idx).unwrap_or("");

        let payload = payload_raw
            .parse::<f64>()
            .map_err(|_| DashboardError::InvalidPayload {
                row: row_no,
                value: payload_raw.to_string(),
            })?;
        let class = class_raw
            .parse::<f64>()
            .map_err(|_| DashboardError::InvalidClass {
                row: row_no,
                value: class_raw.to_string(),
            })?;

        records.push(build_record(row_no, site, payload, class)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0, "class": 0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = match obj.get(SITE_COLUMN) {
            Some(JsonValue::String(s)) => s.as_str(),
            Some(_) => bail!("Row {i}: '{SITE_COLUMN}' is not a string"),
            None => return Err(DashboardError::MissingColumn(SITE_COLUMN.to_string()).into()),
        };

        let payload = match json_number(obj.get(PAYLOAD_COLUMN)) {
            None => return Err(DashboardError::MissingColumn(PAYLOAD_COLUMN.to_string()).into()),
            Some(Err(value)) => return Err(DashboardError::InvalidPayload { row: i, value }.into()),
            Some(Ok(v)) => v,
        };
        let class = match json_number(obj.get(CLASS_COLUMN)) {
            None => return Err(DashboardError::MissingColumn(CLASS_COLUMN.to_string()).into()),
            Some(Err(value)) => return Err(DashboardError::InvalidClass { row: i, value }.into()),
            Some(Ok(v)) => v,
        };

        records.push(build_record(i, site, payload, class)?);
    }

    Ok(records)
}

/// Numeric field, accepting numbers or numeric strings. `None` if absent,
/// `Err` carries the raw text that failed to parse.
fn json_number(val: Option<&JsonValue>) -> Option<std::result::Result<f64, String>> {
    let parsed = match val? {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| n.to_string()),
        JsonValue::String(s) => s.trim().parse::<f64>().map_err(|_| s.clone()),
        other => Err(other.to_string()),
    };
    Some(parsed)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `Launch Site`, `Payload Mass (kg)` and
/// `class` columns. Numeric columns may be any integer or float width.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| DashboardError::MissingColumn(name.to_string()))?;
            Ok(batch.column(idx).clone())
        };

        let sites = cast(&column(SITE_COLUMN)?, &DataType::Utf8)
            .with_context(|| format!("casting '{SITE_COLUMN}' to text"))?;
        let payloads = cast(&column(PAYLOAD_COLUMN)?, &DataType::Float64)
            .with_context(|| format!("casting '{PAYLOAD_COLUMN}' to float"))?;
        let classes = cast(&column(CLASS_COLUMN)?, &DataType::Float64)
            .with_context(|| format!("casting '{CLASS_COLUMN}' to float"))?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let global_row = records.len();
            if sites.is_null(row) {
                bail!("Row {global_row}: null '{SITE_COLUMN}'");
            }
            if payloads.is_null(row) {
                return Err(DashboardError::InvalidPayload {
                    row: global_row,
                    value: "null".to_string(),
                }
                .into());
            }
            if classes.is_null(row) {
                return Err(DashboardError::InvalidClass {
                    row: global_row,
                    value: "null".to_string(),
                }
                .into());
            }

            records.push(build_record(
                global_row,
                sites.value(row),
                payloads.value(row),
                classes.value(row),
            )?);
        }
    }

    Ok(records)
}
