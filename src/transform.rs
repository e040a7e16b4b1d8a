//! Per-row record builder.

use crate::cell::{Row, Scalar};
use crate::mapping::{MappingConfig, MappingRule};
use crate::passthrough::{self, EXTRA_KEY};
use crate::record::{Node, Record};
use serde_json::Value;

/// Returns the required columns that are missing, absent or blank in `row`.
/// An empty result means the row may be built.
pub fn missing_required_fields(row: &Row, config: &MappingConfig) -> Vec<String> {
    config
        .required_fields
        .iter()
        .filter(|column| match row.value(column) {
            None => true,
            Some(value) => value.is_blank(),
        })
        .cloned()
        .collect()
}

/// Resolves a rule against `row`. `None` means nothing should be written.
fn resolve(rule: &MappingRule, row: &Row) -> Option<Node> {
    let node = match rule {
        MappingRule::Column(column) => Node::Scalar(row.value(column)?),
        MappingRule::Constant(Value::Null) => return None,
        MappingRule::Constant(Value::String(s)) => Node::Scalar(Scalar::Text(s.trim().to_string())),
        MappingRule::Constant(other) => Node::Json(other.clone()),
    };
    match &node {
        Node::Scalar(value) if value.is_blank() => None,
        _ => Some(node),
    }
}

/// Applies every mapping rule in declared order to a fresh record.
pub fn apply_mapping(row: &Row, config: &MappingConfig) -> Record {
    let mut record = Record::new();
    for field in &config.mapping {
        // absent and empty values are never written, with or without drop_empty
        if let Some(node) = resolve(&field.rule, row) {
            record.set_deep(&field.path, node);
        }
    }
    record
}

/// Builds the output record for one row, or `None` when a required field is missing.
pub fn build_record(row: &Row, config: &MappingConfig) -> Option<Record> {
    if !missing_required_fields(row, config).is_empty() {
        return None;
    }

    let mut record = apply_mapping(row, config);
    let extra = passthrough::extract(row, &config.passthrough_columns);
    if !extra.is_empty() {
        record.merge_object(EXTRA_KEY, extra);
    }
    Some(record)
}
