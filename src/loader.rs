//! CSV/TSV loading into [`Row`]s.
//!
//! The first record is the header. Empty cells and the usual spreadsheet
//! missing markers read as [`Cell::Absent`]. With inference enabled each
//! column gets a single type: boolean, integer, float or timestamp when every
//! present cell in the column parses as that type, text otherwise.

use crate::cell::{Cell, Row};
use crate::error::LoadError;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const MISSING_MARKERS: [&str; 18] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#NA", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// Give each column a boolean, numeric or timestamp type when all its cells agree.
    pub infer_types: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_types: true,
        }
    }
}

impl LoadOptions {
    /// Defaults for `path`: tab-delimited for `.tsv`, comma otherwise.
    pub fn for_path(path: &Path) -> Self {
        let is_tsv = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        Self {
            delimiter: if is_tsv { b'\t' } else { b',' },
            ..Self::default()
        }
    }
}

/// The type shared by every cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Bool,
    Integer,
    Number,
    DateTime,
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_MARKERS.contains(&raw)
}

fn parse_bool(token: &str) -> Option<bool> {
    match token {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

// bare words like "inf" stay text; only numeric-looking tokens become floats
fn parse_number(token: &str) -> Option<f64> {
    if !token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

// full timestamps only; a bare date stays text
fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
}

/// Picks the narrowest type every present cell in `values` parses as.
/// A column with no present cells is text.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut bool_ok, mut int_ok, mut num_ok, mut ts_ok) = (true, true, true, true);
    let mut seen = false;
    for raw in values.into_iter().filter(|raw| !is_missing(raw)) {
        seen = true;
        let token = raw.trim();
        bool_ok = bool_ok && parse_bool(token).is_some();
        int_ok = int_ok && token.parse::<i64>().is_ok();
        num_ok = num_ok && parse_number(token).is_some();
        ts_ok = ts_ok && parse_timestamp(token).is_some();
        if !(bool_ok || int_ok || num_ok || ts_ok) {
            return ColumnType::Text;
        }
    }

    match (seen, bool_ok, int_ok, num_ok, ts_ok) {
        (false, ..) => ColumnType::Text,
        (_, true, ..) => ColumnType::Bool,
        (_, _, true, ..) => ColumnType::Integer,
        (_, _, _, true, _) => ColumnType::Number,
        (_, _, _, _, true) => ColumnType::DateTime,
        _ => ColumnType::Text,
    }
}

/// Reads one raw cell as `column_type`. Cells that do not fit stay text.
pub fn parse_cell(raw: &str, column_type: ColumnType) -> Cell {
    if is_missing(raw) {
        return Cell::Absent;
    }
    let token = raw.trim();
    let typed = match column_type {
        ColumnType::Text => None,
        ColumnType::Bool => parse_bool(token).map(Cell::Bool),
        ColumnType::Integer => token.parse::<i64>().ok().map(Cell::Integer),
        ColumnType::Number => parse_number(token).map(Cell::Number),
        ColumnType::DateTime => parse_timestamp(token).map(Cell::DateTime),
    };
    typed.unwrap_or_else(|| Cell::Text(raw.to_string()))
}

/// Reads rows from any reader.
pub fn read_rows<R: Read>(reader: R, options: LoadOptions) -> Result<Vec<Row>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut records: Vec<StringRecord> = Vec::new();

    for (row_num, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            tracing::warn!(
                row = row_num,
                cells = record.len(),
                columns = headers.len(),
                "row has more cells than headers, ignoring the extra cells"
            );
        }
        records.push(record);
    }

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|i| {
            if options.infer_types {
                infer_column_type(records.iter().filter_map(|record| record.get(i)))
            } else {
                ColumnType::Text
            }
        })
        .collect();
    tracing::debug!(rows = records.len(), columns = ?column_types, "loaded table");

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .zip(&column_types)
                .enumerate()
                .map(|(i, (column, column_type))| {
                    let cell = record
                        .get(i)
                        .map(|raw| parse_cell(raw, *column_type))
                        .unwrap_or(Cell::Absent);
                    (column, cell)
                })
                .collect::<Row>()
        })
        .collect();
    Ok(rows)
}

/// Reads rows from a CSV/TSV file.
pub fn load_rows<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Vec<Row>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(BufReader::new(file), options)
}
