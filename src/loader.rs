//! Cohort record loading and writing
//!
//! Records are YAML documents (JSON when the file extension is `.json`).
//! Documents are parsed first and then deserialized into the typed models
//! while tracking the field path, so that a missing structural field or a
//! non-integer count is reported with its dotted path instead of being
//! coerced.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::{AuditError, Result};
use crate::models::record::CohortRecord;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() || path == "." {
        key.to_string()
    } else if path == key || path.ends_with(&format!(".{key}")) {
        path.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Field named in a serde message such as ``missing field `n_patients` ``
fn named_field<'m>(message: &'m str, kind: &str) -> Option<&'m str> {
    let start = message.find(kind)? + kind.len();
    message[start..].strip_prefix(" `")?.split('`').next()
}

fn classify(err: serde_path_to_error::Error<serde_yaml::Error>) -> AuditError {
    let path = err.path().to_string();
    let message = err.into_inner().to_string();

    if let Some(name) = named_field(&message, "missing field") {
        return AuditError::missing(join(&path, name));
    }
    if let Some(name) = named_field(&message, "unknown field") {
        return AuditError::invalid(join(&path, name), message);
    }
    AuditError::invalid(if path == "." { "record" } else { path.as_str() }, message)
}

/// Build a typed cohort record from a parsed document
///
/// `inequity_flags` in the input are derived data and are not read.
pub fn parse_record(document: Value) -> Result<CohortRecord> {
    serde_path_to_error::deserialize(document).map_err(classify)
}

/// Parse a cohort record from YAML text
pub fn record_from_str(text: &str) -> Result<CohortRecord> {
    let document: Value = serde_yaml::from_str(text)?;
    parse_record(document)
}

/// Load a cohort record from a YAML or JSON file
pub fn load_record(path: &Path) -> Result<CohortRecord> {
    let file = safe_open_file(path, "loading cohort record")?;
    let document: Value = if is_json(path) {
        serde_json::from_reader(file)?
    } else {
        serde_yaml::from_reader(file)?
    };

    let record = parse_record(document)?;
    log::debug!(
        "Loaded record {} ({} patients) from {}",
        record.id,
        record.cohort.n_patients,
        path.display()
    );
    Ok(record)
}

/// Write any record shape to a YAML or JSON file, keeping field order
pub fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let mut file = safe_create_file(path)?;
    if is_json(path) {
        serde_json::to_writer_pretty(&mut file, record)?;
        writeln!(file).map_err(|e| AuditError::io(path, e))?;
    } else {
        serde_yaml::to_writer(&mut file, record)?;
    }
    file.flush().map_err(|e| AuditError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r"
id: mini
name: Mini Cohort
cohort:
  n_patients: 100
  countries: [DE]
demographics:
  sex:
    male: 40
    female: 55
    unknown: 5
    completeness: 0.95
";

    #[test]
    fn test_parse_minimal_record() {
        let record = record_from_str(MINIMAL).unwrap();
        assert_eq!(record.id, "mini");
        assert_eq!(record.cohort.n_patients, 100);
        assert_eq!(record.cohort.sites, None);
        assert!(record.demographics.age.is_none());

        let sex = record.demographics.sex.unwrap();
        assert_eq!(sex.counts.keys().collect::<Vec<_>>(), vec!["male", "female", "unknown"]);
        assert_eq!(sex.completeness, Some(0.95));
    }

    #[test]
    fn test_missing_n_patients() {
        let err = record_from_str("id: a\nname: A\ncohort:\n  n_images: 3\n").unwrap_err();
        assert!(
            matches!(err, AuditError::MissingField { ref field } if field == "cohort.n_patients")
        );
    }

    #[test]
    fn test_null_n_patients_is_missing() {
        let err = record_from_str("id: a\nname: A\ncohort:\n  n_patients: ~\n").unwrap_err();
        assert!(matches!(err, AuditError::MissingField { .. }));
    }

    #[test]
    fn test_non_numeric_count_is_rejected() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  sex:\n    male: many\n";
        let err = record_from_str(text).unwrap_err();
        match err {
            AuditError::DataFormat { field, .. } => assert!(field.starts_with("demographics.sex")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_count_is_rejected() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  age:\n    bins:\n      0-17: 1.5\n";
        let err = record_from_str(text).unwrap_err();
        assert!(matches!(err, AuditError::DataFormat { .. }));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  income:\n    low: 1\n";
        let err = record_from_str(text).unwrap_err();
        assert!(matches!(err, AuditError::DataFormat { ref field, .. } if field == "demographics.income"));
    }

    #[test]
    fn test_race_schema_and_derived_fields_are_not_counts() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  race_ethnicity:\n    white: 2\n    unknown: ~\n    schema: NIH_OMB_1997\n    percentages:\n      white: 66.67\n    completeness: 0.667\n";
        let record = record_from_str(text).unwrap();
        let race = record.demographics.race_ethnicity.unwrap();

        assert_eq!(race.counts.keys().collect::<Vec<_>>(), vec!["white", "unknown"]);
        assert_eq!(race.counts.get("unknown"), Some(&None));
        assert_eq!(race.schema.as_deref(), Some("NIH_OMB_1997"));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  age:\n    bins:\n      0-17: -1\n";
        let err = record_from_str(text).unwrap_err();
        assert!(
            matches!(err, AuditError::DataFormat { ref field, .. } if field == "demographics.age.bins.0-17")
        );
    }

    #[test]
    fn test_missing_id_is_reported_at_top_level() {
        let err = record_from_str("name: A\ncohort:\n  n_patients: 3\n").unwrap_err();
        assert!(matches!(err, AuditError::MissingField { ref field } if field == "id"));
    }

    #[test]
    fn test_unrecognised_age_fields_are_ignored() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ndemographics:\n  age:\n    median: 61\n    bins:\n      80+: 3\n";
        let record = record_from_str(text).unwrap();
        let age = record.demographics.age.unwrap();
        assert_eq!(age.bins.unwrap().count("80+"), 3);
        assert_eq!(age.mean, None);
    }

    #[test]
    fn test_input_flags_are_not_read() {
        let text = "id: a\nname: A\ncohort:\n  n_patients: 3\ninequity_flags:\n  sex:\n    sex_imbalance: true\n";
        assert!(record_from_str(text).unwrap().inequity_flags.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.json");

        let record = record_from_str(MINIMAL).unwrap();
        write_record(&path, &record).unwrap();
        let reloaded = load_record(&path).unwrap();
        assert_eq!(reloaded, record);
    }
}
