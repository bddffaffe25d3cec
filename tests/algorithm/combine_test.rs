//! Tests for combining cohort records

use cohort_audit::models::template::new_lung_ct;
use cohort_audit::models::{Category, InequityFlags};
use cohort_audit::{combine, summarize};

use crate::utils::tcia_lung_ct;

const COMBINED_FLAGS: &str = r"
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
    hispanic: false
    other: false
  high_unknown_fraction: false
  non_standard_schema: false
data_quality:
  low_age_completeness: true
  low_sex_completeness: true
  low_race_completeness: true
";

#[test]
fn test_combined_totals_are_commutative() {
    let a = new_lung_ct();
    let b = tcia_lung_ct();

    let ab = combine(&a, &b).unwrap();
    let ba = combine(&b, &a).unwrap();

    assert_eq!(ab.cohort.n_patients, a.cohort.n_patients + b.cohort.n_patients);
    assert_eq!(ba.cohort.n_patients, ab.cohort.n_patients);
    assert_eq!(ab.cohort.n_images, Some(38920 + 251_135));
    assert_eq!(ba.id, "tcia_lung_ct+new_lung_ct");
}

#[test]
fn test_combined_flags_golden() {
    let combined = combine(&new_lung_ct(), &tcia_lung_ct()).unwrap();
    let expected: InequityFlags = serde_yaml::from_str(COMBINED_FLAGS).unwrap();

    assert_eq!(combined.inequity_flags, Some(expected));
}

#[test]
fn test_combined_sites_are_unset() {
    let a = new_lung_ct();
    let b = tcia_lung_ct();
    assert!(a.cohort.sites.is_some() && b.cohort.sites.is_some());

    let combined = combine(&a, &b).unwrap();
    assert_eq!(combined.cohort.sites, None);
    assert_eq!(combined.cohort.countries, vec!["NL", "US"]);
}

#[test]
fn test_pipelines_agree_on_derived_statistics() {
    let combined = combine(&new_lung_ct(), &tcia_lung_ct()).unwrap();
    let summary = summarize(&combined);

    let sex = combined.demographics.sex.as_ref().unwrap();
    let sex_summary = summary.category(Category::Sex).unwrap();
    assert_eq!(sex.percentages.as_ref(), Some(&sex_summary.percentages));
    assert_eq!(sex.completeness, Some(sex_summary.completeness));

    let race = combined.demographics.race_ethnicity.as_ref().unwrap();
    let race_summary = summary.category(Category::RaceEthnicity).unwrap();
    assert_eq!(race.percentages.as_ref(), Some(&race_summary.percentages));
    assert_eq!(race.completeness, Some(race_summary.completeness));

    let age = combined.demographics.age.as_ref().unwrap();
    let age_summary = summary.category(Category::Age).unwrap();
    assert_eq!(age.percentages.as_ref(), Some(&age_summary.percentages));
    assert_eq!(age.completeness, Some(age_summary.completeness));

    // Only the combiner evaluates the schema flag
    let mut combined_flags = combined.inequity_flags.unwrap();
    assert_eq!(combined_flags.race_ethnicity.non_standard_schema, Some(false));
    combined_flags.race_ethnicity.non_standard_schema = None;
    assert_eq!(combined_flags, summary.inequity_flags);
}

#[test]
fn test_new_race_groups_are_appended() {
    let mut b = tcia_lung_ct();
    if let Some(race) = b.demographics.race_ethnicity.as_mut() {
        race.counts.insert("native_hawaiian", Some(3));
    }

    let combined = combine(&new_lung_ct(), &b).unwrap();
    let race = combined.demographics.race_ethnicity.unwrap();
    assert_eq!(
        race.counts.keys().collect::<Vec<_>>(),
        vec!["white", "black", "asian", "hispanic", "other", "unknown", "native_hawaiian"]
    );
    let flags = combined.inequity_flags.unwrap();
    assert_eq!(
        flags.race_ethnicity.race_group_sparse.get("native_hawaiian"),
        Some(&true)
    );
}
