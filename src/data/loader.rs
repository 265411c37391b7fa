use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
    UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{GameRecord, GameTable, RawGameRow, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the catalog column names (recommended)
/// * `.json`    – `[{ "name": ..., "release_date": ..., ... }, ...]`
/// * `.parquet` – one column per catalog field
///
/// Every format goes through [`GameRecord::from_raw`], so derived columns
/// are identical regardless of the source.
pub fn load_file(path: &Path) -> Result<GameTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let unparsed_owners = table
        .iter()
        .filter(|g| g.owners_estimate.is_none())
        .count();
    if unparsed_owners > 0 {
        log::warn!(
            "{}: {unparsed_owners} rows with unparseable owners counted as 0",
            path.display()
        );
    }
    log::info!("Loaded {} games from {}", table.len(), path.display());

    Ok(table)
}

fn derive_all(rows: impl IntoIterator<Item = RawGameRow>) -> Result<GameTable, LoadError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, raw)| GameRecord::from_raw(raw, row))
        .collect::<Result<Vec<_>, _>>()
        .map(GameTable::from_games)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one game per line.
/// Columns beyond the catalog contract (appid, developer, ...) are ignored.
fn load_csv(path: &Path) -> Result<GameTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    read_csv(file)
}

/// Parse CSV from any reader.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<GameTable, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let rows = reader
        .deserialize::<RawGameRow>()
        .collect::<Result<Vec<_>, _>>()?;

    derive_all(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "name": "Counter-Strike",
///     "release_date": "2000-11-01",
///     "price": 7.19,
///     "owners": "10000000-20000000",
///     ...
///   },
///   ...
/// ]
/// ```
///
/// `owners` may be a number as well as a string.
fn load_json(path: &Path) -> Result<GameTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    parse_json(&text)
}

/// Parse a JSON records array.
pub fn parse_json(text: &str) -> Result<GameTable, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root.as_array().ok_or(LoadError::InvalidField {
        row: 0,
        column: "name",
        message: "expected top-level JSON array".to_string(),
    })?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::InvalidField {
            row: i,
            column: "name",
            message: "row is not a JSON object".to_string(),
        })?;
        rows.push(json_row(obj, i)?);
    }

    derive_all(rows)
}

fn json_row(obj: &Map<String, JsonValue>, row: usize) -> Result<RawGameRow, LoadError> {
    for column in REQUIRED_COLUMNS {
        if !obj.contains_key(column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    Ok(RawGameRow {
        name: json_text(obj, "name", row)?.unwrap_or_default(),
        release_date: json_text(obj, "release_date", row)?.unwrap_or_default(),
        price: json_f64(obj, "price", row)?,
        positive_ratings: json_u64(obj, "positive_ratings", row)?,
        negative_ratings: json_u64(obj, "negative_ratings", row)?,
        owners: json_text(obj, "owners", row)?.unwrap_or_default(),
        genres: json_text(obj, "genres", row)?,
        platforms: json_text(obj, "platforms", row)?,
        publisher: json_text(obj, "publisher", row)?,
        average_playtime: json_f64(obj, "average_playtime", row)?,
        achievements: json_u64(obj, "achievements", row)?,
    })
}

/// Strings pass through, numbers are rendered, null and "" are missing.
fn json_text(
    obj: &Map<String, JsonValue>,
    column: &'static str,
    row: usize,
) -> Result<Option<String>, LoadError> {
    match obj.get(column) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(invalid(row, column, format!("expected text, got {other}"))),
    }
}

fn json_f64(obj: &Map<String, JsonValue>, column: &'static str, row: usize) -> Result<f64, LoadError> {
    obj.get(column)
        .and_then(JsonValue::as_f64)
        .ok_or_else(|| invalid(row, column, "not a number".to_string()))
}

fn json_u64(obj: &Map<String, JsonValue>, column: &'static str, row: usize) -> Result<u64, LoadError> {
    let value = obj.get(column);
    value
        .and_then(JsonValue::as_u64)
        .or_else(|| {
            // pandas writes integer columns holding NaN as floats
            value
                .and_then(JsonValue::as_f64)
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
        .ok_or_else(|| invalid(row, column, "not a non-negative integer".to_string()))
}

fn invalid(row: usize, column: &'static str, message: String) -> LoadError {
    LoadError::InvalidField {
        row,
        column,
        message,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a catalog export.
///
/// Text columns may be Utf8 or LargeUtf8; numeric columns any of the usual
/// integer/float widths; `release_date` may be Utf8 or Date32.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<GameTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema();
    for column in REQUIRED_COLUMNS {
        if schema.index_of(column).is_err() {
            return Err(LoadError::MissingColumn(column));
        }
    }
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let offset = rows.len();
        rows.extend(batch_rows(&batch, offset)?);
    }

    derive_all(rows)
}

fn batch_rows(batch: &RecordBatch, offset: usize) -> Result<Vec<RawGameRow>, LoadError> {
    let column = |name| batch_column(batch, name);
    let name = column("name")?;
    let release_date = column("release_date")?;
    let price = column("price")?;
    let positive = column("positive_ratings")?;
    let negative = column("negative_ratings")?;
    let owners = column("owners")?;
    let genres = column("genres")?;
    let platforms = column("platforms")?;
    let publisher = column("publisher")?;
    let playtime = column("average_playtime")?;
    let achievements = column("achievements")?;

    (0..batch.num_rows())
        .map(|i| {
            let row = offset + i;
            Ok(RawGameRow {
                name: text_cell(name, i).unwrap_or_default(),
                release_date: date_cell(release_date, i).unwrap_or_default(),
                price: f64_cell(price, i).ok_or_else(|| invalid(row, "price", "not a number".into()))?,
                positive_ratings: u64_cell(positive, i)
                    .ok_or_else(|| invalid(row, "positive_ratings", "not an integer".into()))?,
                negative_ratings: u64_cell(negative, i)
                    .ok_or_else(|| invalid(row, "negative_ratings", "not an integer".into()))?,
                owners: text_cell(owners, i).unwrap_or_default(),
                genres: text_cell(genres, i),
                platforms: text_cell(platforms, i),
                publisher: text_cell(publisher, i),
                average_playtime: f64_cell(playtime, i)
                    .ok_or_else(|| invalid(row, "average_playtime", "not a number".into()))?,
                achievements: u64_cell(achievements, i)
                    .ok_or_else(|| invalid(row, "achievements", "not an integer".into()))?,
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

/// Read a cell as text. Numbers are rendered so a numeric `owners` column
/// still parses; null and "" are missing.
fn text_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => {
            u64_cell(col, row)?.to_string()
        }
        DataType::Float32 | DataType::Float64 => f64_cell(col, row)?.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn date_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Date32 => col
            .as_any()
            .downcast_ref::<Date32Array>()?
            .value_as_date(row)
            .map(|d| d.format("%Y-%m-%d").to_string()),
        _ => text_cell(col, row),
    }
}

fn f64_cell(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::UInt64 => any.downcast_ref::<UInt64Array>().map(|a| a.value(row) as f64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as f64),
        _ => None,
    }
}

fn u64_cell(col: &ArrayRef, row: usize) -> Option<u64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::UInt64 => any.downcast_ref::<UInt64Array>().map(|a| a.value(row)),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as u64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .and_then(|a| u64::try_from(a.value(row)).ok()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .and_then(|a| u64::try_from(a.value(row)).ok()),
        DataType::Float64 | DataType::Float32 => f64_cell(col, row)
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64),
        _ => None,
    }
}
