use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchDataset,
    LaunchRecord, OutcomeClass,
};

// ---------------------------------------------------------------------------
// Schema / value errors
// ---------------------------------------------------------------------------

/// Problems with the content of an otherwise readable dataset file.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: payload mass '{value}' is not a finite non-negative number")]
    InvalidPayload { row: usize, value: String },
    #[error("row {row}: class must be 0 or 1, got '{value}'")]
    InvalidClass { row: usize, value: String },
    #[error("row {row}: empty launch site")]
    EmptySite { row: usize },
    #[error("dataset contains no launches")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the canonical export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites, {} booster categories, payload {}–{} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.booster_categories().len(),
        dataset.min_payload(),
        dataset.max_payload(),
    );
    Ok(dataset)
}

fn finish(records: Vec<LaunchRecord>) -> Result<LaunchDataset> {
    Ok(LaunchDataset::from_records(records).ok_or(LoadError::EmptyDataset)?)
}

// -- Value validation shared by all formats --

fn check_site(site: String, row: usize) -> Result<String, LoadError> {
    if site.trim().is_empty() {
        return Err(LoadError::EmptySite { row });
    }
    Ok(site)
}

fn check_payload(value: Option<f64>, raw: &str, row: usize) -> Result<f64, LoadError> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(LoadError::InvalidPayload {
            row,
            value: raw.to_string(),
        }),
    }
}

fn check_class(value: Option<f64>, raw: &str, row: usize) -> Result<OutcomeClass, LoadError> {
    match value {
        Some(v) if v == 0.0 => Ok(OutcomeClass::Failure),
        Some(v) if v == 1.0 => Ok(OutcomeClass::Success),
        _ => Err(LoadError::InvalidClass {
            row,
            value: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per record.
fn load_csv<R: Read>(source: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(COL_LAUNCH_SITE)?;
    let payload_idx = column(COL_PAYLOAD_MASS)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER_CATEGORY)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let raw_payload = field(payload_idx);
        let raw_class = field(class_idx);

        records.push(LaunchRecord {
            launch_site: check_site(field(site_idx).to_string(), row_no)?,
            payload_mass_kg: check_payload(raw_payload.parse().ok(), raw_payload, row_no)?,
            outcome: check_class(raw_class.parse().ok(), raw_class, row_no)?,
            booster_version_category: field(booster_idx).to_string(),
        });
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let get = |name: &'static str| obj.get(name).ok_or(LoadError::MissingColumn(name));

        let site = get(COL_LAUNCH_SITE)?;
        let payload = get(COL_PAYLOAD_MASS)?;
        let class = get(COL_CLASS)?;
        let booster = get(COL_BOOSTER_CATEGORY)?;

        records.push(LaunchRecord {
            launch_site: check_site(json_text(site), i)?,
            payload_mass_kg: check_payload(payload.as_f64(), &payload.to_string(), i)?,
            outcome: check_class(class.as_f64(), &class.to_string(), i)?,
            booster_version_category: json_text(booster),
        });
    }

    finish(records)
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`, `class`: Int32, Int64, Float32 or Float64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = required_column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = required_column(&batch, COL_PAYLOAD_MASS)?;
        let class_col = required_column(&batch, COL_CLASS)?;
        let booster_col = required_column(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            // Row numbers continue across batches.
            let row_no = records.len();

            let payload = extract_f64(payload_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_PAYLOAD_MASS}'"))?;
            let class = extract_f64(class_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_CLASS}'"))?;
            let site = extract_string(site_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_LAUNCH_SITE}'"))?;
            let booster = extract_string(booster_col, row).with_context(|| {
                format!("Row {row_no}: failed to read '{COL_BOOSTER_CATEGORY}'")
            })?;

            records.push(LaunchRecord {
                launch_site: check_site(site, row_no)?,
                payload_mass_kg: check_payload(payload, &format_opt(payload), row_no)?,
                outcome: check_class(class, &format_opt(class), row_no)?,
                booster_version_category: booster,
            });
        }
    }

    finish(records)
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a ArrayRef, LoadError> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| LoadError::MissingColumn(name))
}

fn format_opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "<null>".to_string())
}

/// Extract a numeric cell as `f64`; `None` for a null cell.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("expected Int32Array")?;
            arr.value(row) as f64
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("expected Int64Array")?;
            arr.value(row) as f64
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            arr.value(row) as f64
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.value(row)
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Extract a string cell; a null cell reads as the empty string.
fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use crate::data::model::fixtures::two_site_records;

    const SCENARIO_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,A,1,500.0,F9 v1.0 B0003,v1.0
2,A,0,2500.0,F9 v1.1 B1003,v1.1
3,B,0,3000.0,F9 v1.1 B1011,v1.1
4,A,1,4000.0,F9 FT B1021.1,FT
5,B,0,9600.0,F9 B4 B1041.1,B4
6,A,1,2500,F9 FT B1029.1,FT
";

    fn load_error(err: &anyhow::Error) -> Option<&LoadError> {
        err.downcast_ref::<LoadError>()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("launch-dash-{}-{name}", std::process::id()))
    }

    #[test]
    fn csv_scenario_ignores_extra_columns() {
        let ds = load_csv(SCENARIO_CSV.as_bytes()).unwrap();
        assert_eq!(ds.records(), two_site_records().as_slice());
    }

    #[test]
    fn csv_missing_column() {
        let csv = "Launch Site,class,Booster Version Category\nA,1,FT\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::MissingColumn(COL_PAYLOAD_MASS))
        );
    }

    #[test]
    fn csv_invalid_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,2,FT\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::InvalidClass { row: 0, value: "2".into() })
        );
    }

    #[test]
    fn csv_invalid_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   A,10,1,FT\nA,heavy,1,FT\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::InvalidPayload { row: 1, value: "heavy".into() })
        );

        let negative = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,FT\n";
        assert!(matches!(
            load_error(&load_csv(negative.as_bytes()).unwrap_err()),
            Some(LoadError::InvalidPayload { row: 0, .. })
        ));
    }

    #[test]
    fn csv_empty_site() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n,10,1,FT\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(load_error(&err), Some(&LoadError::EmptySite { row: 0 }));
    }

    #[test]
    fn csv_header_only_is_empty_dataset() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(load_error(&err), Some(&LoadError::EmptyDataset));
    }

    #[test]
    fn csv_accepts_float_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1.0,FT\n";
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].outcome, OutcomeClass::Success);
    }

    #[test]
    fn json_scenario() {
        let text = serde_json::to_string(&two_site_records()).unwrap();
        let ds = parse_json(&text).unwrap();
        assert_eq!(ds.records(), two_site_records().as_slice());
    }

    #[test]
    fn json_missing_key() {
        let text = r#"[{"Launch Site": "A", "Payload Mass (kg)": 1.0, "class": 1}]"#;
        let err = parse_json(text).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::MissingColumn(COL_BOOSTER_CATEGORY))
        );
    }

    #[test]
    fn json_null_payload() {
        let text = r#"[{"Launch Site": "A", "Payload Mass (kg)": null, "class": 1,
                        "Booster Version Category": "FT"}]"#;
        let err = parse_json(text).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::InvalidPayload { row: 0, value: "null".into() })
        );
    }

    #[test]
    fn parquet_scenario() {
        let recs = two_site_records();
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(recs.iter().map(|r| r.launch_site.as_str()))),
                Arc::new(Float64Array::from_iter_values(recs.iter().map(|r| r.payload_mass_kg))),
                Arc::new(Int64Array::from_iter_values(recs.iter().map(|r| i64::from(r.outcome.value())))),
                Arc::new(StringArray::from_iter_values(
                    recs.iter().map(|r| r.booster_version_category.as_str()),
                )),
            ],
        )
        .unwrap();

        let path = temp_path("scenario.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.records(), recs.as_slice());
    }

    #[test]
    fn csv_file_dispatch() {
        let path = temp_path("scenario.csv");
        std::fs::write(&path, SCENARIO_CSV).unwrap();
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.sites(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_file(&temp_path("does-not-exist.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
