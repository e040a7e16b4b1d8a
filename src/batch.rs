//! Batch driver: builds every row, optionally wraps the result and writes JSON.

use crate::cell::Row;
use crate::error::OutputError;
use crate::mapping::MappingConfig;
use crate::record::Record;
use crate::transform::{build_record, missing_required_fields};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// A row left out of the output because required fields were missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position in the input rows.
    pub index: usize,
    pub missing: Vec<String>,
}

/// Records built from a batch, in input order, plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRow>,
}

/// Builds a record for each row in order, dropping rows that fail the required-field gate.
pub fn build_records(rows: &[Row], config: &MappingConfig) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        records: Vec::with_capacity(rows.len()),
        skipped: Vec::new(),
    };

    for (index, row) in rows.iter().enumerate() {
        match build_record(row, config) {
            Some(record) => outcome.records.push(record),
            None => {
                let missing = missing_required_fields(row, config);
                tracing::debug!(row = index, missing = ?missing, "skipping row without required fields");
                outcome.skipped.push(SkippedRow { index, missing });
            }
        }
    }

    tracing::info!(
        built = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "built records"
    );
    outcome
}

/// The final document: a bare array, or the array under a single key.
#[derive(Debug, Clone)]
pub enum OutputDocument {
    Bare(Vec<Record>),
    Wrapped { name: String, records: Vec<Record> },
}

impl OutputDocument {
    pub fn new(records: Vec<Record>, array_name: Option<&str>) -> Self {
        match array_name {
            Some(name) if !name.is_empty() => OutputDocument::Wrapped {
                name: name.to_string(),
                records,
            },
            _ => OutputDocument::Bare(records),
        }
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutputDocument::Bare(records) => records.serialize(serializer),
            OutputDocument::Wrapped { name, records } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, records)?;
                map.end()
            }
        }
    }
}

/// Serializes `document` to `writer`, pretty-printed with two-space indentation unless `pretty` is off.
pub fn write_document<W: Write>(
    mut writer: W,
    document: &OutputDocument,
    pretty: bool,
) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `document` to `path`, creating missing parent directories.
pub fn write_json_file<P: AsRef<Path>>(
    path: P,
    document: &OutputDocument,
    pretty: bool,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_document(BufWriter::new(file), document, pretty)
}
