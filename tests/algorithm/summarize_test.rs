//! Tests for summarizing cohort records

use cohort_audit::models::{Category, InequityFlags};
use cohort_audit::summarize;

use crate::utils::tcia_lung_ct;

const SUMMARY_FLAGS: &str = r"
age:
  missing_pediatric_population: false
  younger_population_underrepresented: true
  age_distribution_skewed: true
sex:
  sex_imbalance: false
  single_sex_dataset: false
race_ethnicity:
  race_majority_dominant: false
  race_group_sparse:
    white: false
    black: false
    asian: false
    hispanic: true
    other: false
  high_unknown_fraction: false
data_quality:
  low_sex_completeness: true
  low_race_completeness: true
";

#[test]
fn test_age_scenario() {
    let summary = summarize(&tcia_lung_ct());
    let flags = &summary.inequity_flags.age;

    assert!(!flags.missing_pediatric_population);
    assert!(flags.younger_population_underrepresented);
    assert!(flags.age_distribution_skewed);

    let age = summary.category(Category::Age).unwrap();
    assert_eq!(age.completeness, 1.0);
    assert_eq!(age.percentages.get("60-79"), Some(&70.2));
}

#[test]
fn test_sex_scenario() {
    let summary = summarize(&tcia_lung_ct());

    assert!(!summary.inequity_flags.sex.sex_imbalance);
    assert!(!summary.inequity_flags.sex.single_sex_dataset);
    assert_eq!(summary.category(Category::Sex).unwrap().completeness, 0.374);
}

#[test]
fn test_race_scenario() {
    let summary = summarize(&tcia_lung_ct());
    let flags = &summary.inequity_flags.race_ethnicity;

    assert!(!flags.race_majority_dominant);
    assert!(!flags.high_unknown_fraction);
    assert_eq!(flags.race_group_sparse.get("hispanic"), Some(&true));
    assert_eq!(flags.non_standard_schema, None);
}

#[test]
fn test_summary_flags_golden() {
    let summary = summarize(&tcia_lung_ct());
    let expected: InequityFlags = serde_yaml::from_str(SUMMARY_FLAGS).unwrap();
    assert_eq!(summary.inequity_flags, expected);
}

#[test]
fn test_summary_counts_are_idempotent() {
    let first = summarize(&tcia_lung_ct());
    let second = summarize(&first.to_cohort_record());

    for category in Category::ALL {
        assert_eq!(
            first.category(category).map(|s| &s.counts),
            second.category(category).map(|s| &s.counts),
            "counts differ for {category}"
        );
    }
    assert_eq!(first.inequity_flags, second.inequity_flags);
}

#[test]
fn test_summary_identity() {
    let summary = summarize(&tcia_lung_ct());
    assert_eq!(summary.id, "tcia_lung_ct");
    assert_eq!(summary.n_patients, 943);
    assert_eq!(
        summary.demographics_summary.keys().collect::<Vec<_>>(),
        vec!["age", "sex", "race_ethnicity"]
    );
}

#[test]
fn test_extra_age_bins_survive_resummarizing() {
    let mut record = tcia_lung_ct();
    let bins = record.demographics.age.as_mut().and_then(|a| a.bins.as_mut()).unwrap();
    bins.insert("90+", Some(3));

    let first = summarize(&record);
    let second = summarize(&first.to_cohort_record());

    let age = first.category(Category::Age).unwrap();
    assert_eq!(age.counts.count("90+"), 3);
    assert_eq!(
        second.category(Category::Age).map(|s| &s.counts),
        Some(&age.counts)
    );
    assert_eq!(first.inequity_flags, second.inequity_flags);
}
