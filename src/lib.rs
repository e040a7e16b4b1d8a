//! # rowmap
//!
//! Turns spreadsheet rows into JSON records driven by a declarative mapping
//! file: dot-path targets, constants, required columns and an `x-extra`
//! passthrough bucket.
//!
//! ```rust,ignore
//! use rowmap::{build_records, load_rows, LoadOptions, MappingConfig, OutputDocument};
//!
//! let config = MappingConfig::from_file("config.yaml")?;
//! let rows = load_rows("registrations.csv", LoadOptions::default())?;
//! let outcome = build_records(&rows, &config);
//! let document = OutputDocument::new(outcome.records, config.array_name.as_deref());
//! ```

pub mod batch;
pub mod cell;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod passthrough;
pub mod record;
pub mod transform;

pub use batch::{build_records, write_document, write_json_file, BatchOutcome, OutputDocument, SkippedRow};
pub use cell::{Cell, Row, Scalar};
pub use error::{ConfigError, LoadError, OutputError};
pub use loader::{load_rows, read_rows, LoadOptions};
pub use mapping::{FieldMapping, MappingConfig, MappingRule};
pub use passthrough::{parse_lat_lon, slugify};
pub use record::{Node, Record};
pub use transform::{apply_mapping, build_record, missing_required_fields};
