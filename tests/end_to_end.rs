use std::fs;
use std::path::PathBuf;

use rowmap::{
    build_records, load_rows, write_json_file, ConfigError, LoadOptions, MappingConfig,
    OutputDocument,
};
use serde_json::{json, Value};
use tempfile::TempDir;

const CONFIG_YAML: &str = r#"
array_name: services
mapping:
  id: ID
  name: Service name
  url: Base URL
  type.group: { const: org.ga4gh }
  type.artifact: { const: drs }
  type.version: DRS version
  organization.name: Organization
  organization.url: Organization URL
  environment: { const: prod }
  createdAt: Timestamp
passthrough_columns:
  - Contact email
  - Geolocation latitude, longitude
required_fields:
  - ID
  - Base URL
"#;

const REGISTRATIONS_CSV: &str = "\
Timestamp,ID,Service name,Base URL,DRS version,Organization,Organization URL,Contact email,\"Geolocation latitude, longitude\"
2024-05-17 14:03:09, org.example.drs ,Example DRS,https://drs.example.org,1.2.0,Example Org,,ops@example.org,\"37.77, -122.42\"
2024-05-18 09:00:00,org.missing.url,Missing URL,,1.2.0,Nobody,,,
2024-05-19 10:30:00,org.other.drs,Other DRS,https://other.example.org,1.3,Other Org,https://other.example.org/about,,somewhere
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn builds_registry_document_from_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = write_fixture(&dir, "config.yaml", CONFIG_YAML);
    let input_path = write_fixture(&dir, "registrations.csv", REGISTRATIONS_CSV);

    let config = MappingConfig::from_file(&config_path).expect("load config");
    let rows = load_rows(&input_path, LoadOptions::for_path(&input_path)).expect("load rows");
    assert_eq!(rows.len(), 3);

    let outcome = build_records(&rows, &config);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].index, 1);
    assert_eq!(outcome.skipped[0].missing, vec!["Base URL"]);

    let document = OutputDocument::new(outcome.records, config.array_name.as_deref());
    let out_path = dir.path().join("out").join("services.json");
    write_json_file(&out_path, &document, true).expect("write output");

    let written: Value =
        serde_json::from_str(&fs::read_to_string(&out_path).expect("read output")).expect("valid json");
    assert_eq!(
        written,
        json!({
            "services": [
                {
                    "id": "org.example.drs",
                    "name": "Example DRS",
                    "url": "https://drs.example.org",
                    "type": {"group": "org.ga4gh", "artifact": "drs", "version": "1.2.0"},
                    "organization": {"name": "Example Org"},
                    "environment": "prod",
                    "createdAt": "2024-05-17T14:03:09",
                    "x-extra": {
                        "contact-email": "ops@example.org",
                        "geolocation-latitude--longitude": "37.77, -122.42",
                        "geolocation": {"lat": 37.77, "lon": -122.42}
                    }
                },
                {
                    "id": "org.other.drs",
                    "name": "Other DRS",
                    "url": "https://other.example.org",
                    "type": {"group": "org.ga4gh", "artifact": "drs", "version": "1.3"},
                    "organization": {"name": "Other Org", "url": "https://other.example.org/about"},
                    "environment": "prod",
                    "createdAt": "2024-05-19T10:30:00",
                    "x-extra": {"geolocation-latitude--longitude": "somewhere"}
                }
            ]
        })
    );
}

#[test]
fn no_infer_keeps_text_values() {
    let config = MappingConfig::from_yaml_str("mapping:\n  type.version: DRS version\n").expect("config");
    let options = LoadOptions {
        infer_types: false,
        ..LoadOptions::default()
    };
    let rows = rowmap::read_rows("DRS version\n1.3\n".as_bytes(), options).expect("rows");
    let outcome = build_records(&rows, &config);
    assert_eq!(
        serde_json::to_value(&outcome.records).expect("encode"),
        json!([{"type": {"version": "1.3"}}])
    );
}

#[test]
fn mixed_columns_keep_one_type_per_field() {
    let config = MappingConfig::from_yaml_str("mapping:\n  type.version: V\n  created: D\n  port: P\n")
        .expect("config");
    let input = "V,D,P\n1.2.0,2024-05-17,8080\n1.3,2024-05-18,NA\n";
    let rows = rowmap::read_rows(input.as_bytes(), LoadOptions::default()).expect("rows");
    let outcome = build_records(&rows, &config);
    assert_eq!(
        serde_json::to_value(&outcome.records).expect("encode"),
        json!([
            {"type": {"version": "1.2.0"}, "created": "2024-05-17", "port": 8080},
            {"type": {"version": "1.3"}, "created": "2024-05-18"}
        ])
    );
}

#[test]
fn tsv_input_and_json_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = write_fixture(
        &dir,
        "config.json",
        r#"{"mapping": {"id": "ID", "organization.name": "Org"}, "required_fields": ["ID"]}"#,
    );
    let input_path = write_fixture(&dir, "rows.tsv", "ID\tOrg\n s1 \tAcme\n\tAcme\n");

    let config = MappingConfig::from_file(&config_path).expect("load config");
    let rows = load_rows(&input_path, LoadOptions::for_path(&input_path)).expect("load rows");
    let outcome = build_records(&rows, &config);
    let document = OutputDocument::new(outcome.records, config.array_name.as_deref());

    assert_eq!(
        serde_json::to_value(&document).expect("encode"),
        json!([{"id": "s1", "organization": {"name": "Acme"}}])
    );
}

#[test]
fn config_errors_surface_before_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = write_fixture(&dir, "bad.yaml", "mapping:\n  organization.: Org\n");
    let err = MappingConfig::from_file(&bad).expect_err("bad path");
    assert!(matches!(err, ConfigError::EmptyPathSegment(_)));

    let missing = dir.path().join("missing.yaml");
    let err = MappingConfig::from_file(&missing).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
}
