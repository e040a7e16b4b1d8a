//! Mapping configuration: target paths, constants, required and passthrough columns.
//!
//! Loaded once from YAML (or JSON) and validated before any row is read.

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// How a target path gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingRule {
    /// Read the named source column.
    Column(String),
    /// Write a literal value from the configuration.
    Constant(serde_json::Value),
}

/// One `target.path -> rule` entry, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    pub path: String,
    pub rule: MappingRule,
}

/// Validated mapping configuration. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingConfig {
    pub mapping: Vec<FieldMapping>,
    pub passthrough_columns: Vec<String>,
    pub required_fields: Vec<String>,
    pub array_name: Option<String>,
    pub drop_empty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRule {
    Column(String),
    Constant {
        #[serde(rename = "const")]
        value: serde_json::Value,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    mapping: IndexMap<String, RawRule>,
    passthrough_columns: Vec<String>,
    #[serde(alias = "required_columns")]
    required_fields: Vec<String>,
    array_name: Option<String>,
    drop_empty: bool,
}

impl MappingConfig {
    /// Loads a config file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // an empty document means "no config", like an empty mapping
        if text.trim().is_empty() {
            return Self::from_raw(RawConfig::default());
        }
        let raw: RawConfig = serde_yaml::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut mapping = Vec::with_capacity(raw.mapping.len());
        for (path, rule) in raw.mapping {
            validate_path(&path)?;
            let rule = match rule {
                RawRule::Column(column) => {
                    check_column(&column, || format!("mapping rule '{}'", path))?;
                    MappingRule::Column(column)
                }
                RawRule::Constant { value } => MappingRule::Constant(value),
            };
            mapping.push(FieldMapping { path, rule });
        }

        for column in &raw.required_fields {
            check_column(column, || "required_fields".to_string())?;
        }
        for column in &raw.passthrough_columns {
            check_column(column, || "passthrough_columns".to_string())?;
        }

        Ok(Self {
            mapping,
            passthrough_columns: raw.passthrough_columns,
            required_fields: raw.required_fields,
            array_name: raw.array_name.filter(|name| !name.is_empty()),
            drop_empty: raw.drop_empty,
        })
    }
}

fn validate_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    if path.split('.').any(str::is_empty) {
        return Err(ConfigError::EmptyPathSegment(path.to_string()));
    }
    Ok(())
}

fn check_column(column: &str, context: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if column.trim().is_empty() {
        return Err(ConfigError::BlankColumn { context: context() });
    }
    Ok(())
}
