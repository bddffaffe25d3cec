//! Tests for reading and writing record files

use cohort_audit::models::template::new_lung_ct;
use cohort_audit::{AuditError, combine, load_record, summarize, write_record};

use crate::utils::tcia_lung_ct;

#[test]
fn test_combined_record_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.yaml");

    let combined = combine(&new_lung_ct(), &tcia_lung_ct()).unwrap();
    write_record(&path, &combined).unwrap();

    let reloaded = load_record(&path).unwrap();
    assert_eq!(reloaded.id, combined.id);
    assert_eq!(reloaded.cohort, combined.cohort);
    assert_eq!(reloaded.provenance, combined.provenance);
    assert_eq!(
        reloaded.demographics.race_ethnicity.as_ref().map(|r| &r.counts),
        combined.demographics.race_ethnicity.as_ref().map(|r| &r.counts)
    );
    assert!(reloaded.inequity_flags.is_none());
}

#[test]
fn test_written_fields_keep_record_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.yaml");

    let combined = combine(&new_lung_ct(), &tcia_lung_ct()).unwrap();
    write_record(&path, &combined).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    let positions: Vec<usize> = [
        "id:",
        "\nname:",
        "\nsource:",
        "\ndomain:",
        "\ncohort:",
        "\ndemographics:",
        "\nprovenance:",
        "\ninequity_flags:",
    ]
    .iter()
    .map(|key| text.find(key).unwrap_or_else(|| panic!("{key} missing")))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("sites: null"));
}

#[test]
fn test_summary_written_to_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datasets").join("tcia_lung_ct_summary.yaml");

    let summary = summarize(&tcia_lung_ct());
    write_record(&path, &summary).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let reloaded: cohort_audit::SummaryRecord = serde_yaml::from_str(&text).unwrap();
    assert_eq!(reloaded, summary);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_record(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, AuditError::Io { .. }));
}
