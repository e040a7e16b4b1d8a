//! Passthrough columns copied into the `x-extra` bucket.
//!
//! Each configured column that has a non-blank value is stored under the slug
//! of its column name. A column whose slug mentions
//! `geolocation-latitude--longitude` additionally yields a structured
//! `geolocation: {lat, lon}` entry when its text is a valid coordinate pair.

use crate::cell::{Row, Scalar};
use crate::record::{Node, Record};

/// Key of the extension bucket on every record.
pub const EXTRA_KEY: &str = "x-extra";

/// Slug fragment identifying a "Geolocation latitude, longitude" column.
pub const GEOLOCATION_MARKER: &str = "geolocation-latitude--longitude";

/// Key of the derived coordinate entry inside the bucket.
pub const GEOLOCATION_KEY: &str = "geolocation";

/// Lowercases alphanumerics and turns every other character into `-`, then
/// trims hyphens from both ends. Runs are not collapsed, so
/// `"Data Center (Region)"` becomes `"data-center--region"`.
pub fn slugify(column: &str) -> String {
    let mut slug = String::with_capacity(column.len());
    for ch in column.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Parses `"lat, lon"` into two finite floats. Anything else is `None`.
pub fn parse_lat_lon(text: &str) -> Option<(f64, f64)> {
    let mut parts = text.split(',').map(str::trim);
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some((lat, lon))
}

/// Builds the passthrough bucket for one row. Missing and blank values are skipped.
pub fn extract(row: &Row, columns: &[String]) -> Record {
    let mut extra = Record::new();
    for column in columns {
        let Some(value) = row.value(column) else {
            continue;
        };
        if value.is_blank() {
            continue;
        }
        extra.insert(slugify(column), Node::Scalar(value));
    }

    let mut geolocation = None;
    for (key, node) in extra.iter() {
        if !key.contains(GEOLOCATION_MARKER) {
            continue;
        }
        let Node::Scalar(Scalar::Text(raw)) = node else {
            continue;
        };
        match parse_lat_lon(raw) {
            Some(pair) => geolocation = Some(pair),
            None => tracing::trace!(column = %key, value = %raw, "unparsable geolocation, skipping"),
        }
    }
    if let Some((lat, lon)) = geolocation {
        let mut coords = Record::new();
        coords.insert("lat", Node::Scalar(Scalar::Number(lat)));
        coords.insert("lon", Node::Scalar(Scalar::Number(lon)));
        extra.insert(GEOLOCATION_KEY, Node::Object(coords));
    }

    extra
}
