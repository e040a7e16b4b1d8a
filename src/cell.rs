//! Tabular cells, their normalized form, and rows.

use chrono::{NaiveDateTime, Timelike};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A raw tabular cell as handed over by a loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Absent,
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// A present, normalized value. Produced by [`Cell::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Missing markers and NaN become `None`; text is trimmed; other values pass through.
    pub fn normalize(&self) -> Option<Scalar> {
        match self {
            Cell::Absent => None,
            Cell::Number(n) if n.is_nan() => None,
            Cell::Text(s) => Some(Scalar::Text(s.trim().to_string())),
            Cell::Integer(i) => Some(Scalar::Integer(*i)),
            Cell::Number(n) => Some(Scalar::Number(*n)),
            Cell::Bool(b) => Some(Scalar::Bool(*b)),
            Cell::DateTime(dt) => Some(Scalar::DateTime(*dt)),
        }
    }
}

impl Scalar {
    /// True for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            // JSON has no representation for inf; fall back to the string form
            Scalar::Number(n) => serializer.collect_str(n),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            // microseconds are written only when present
            Scalar::DateTime(dt) if dt.nanosecond() == 0 => {
                serializer.collect_str(&dt.format(ISO_FORMAT))
            }
            Scalar::DateTime(dt) => serializer.collect_str(&dt.format(ISO_FORMAT_MICROS)),
        }
    }
}

/// One input row: column name to cell, in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(pub IndexMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for `column`, `Absent` when the row has no such column.
    pub fn get(&self, column: &str) -> &Cell {
        self.0.get(column).unwrap_or(&Cell::Absent)
    }

    /// Normalized value of `column`, `None` when missing.
    pub fn value(&self, column: &str) -> Option<Scalar> {
        self.get(column).normalize()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        Row(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
