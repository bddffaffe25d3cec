//! Inequity flag engine
//!
//! Derives inequity flags from one canonical view of a cohort's demographics:
//! per category, a count mapping and an optional completeness. The combiner
//! and the summarizer both normalize into this view, so every flag rule
//! exists exactly once.

use crate::config::{AuditConfig, FlagThresholds, REFERENCE_RACE_SCHEMA};
use crate::models::counts::{CountMap, coalesce};
use crate::models::demographics::UNKNOWN_KEY;
use crate::models::flags::{
    AgeFlags, DataQualityFlags, InequityFlags, RaceEthnicityFlags, SexFlags,
};

/// Counts and completeness of one category as seen by the flag rules
#[derive(Debug, Clone, Copy)]
pub struct CategoryView<'a> {
    pub counts: &'a CountMap,
    /// Absent completeness never raises a data-quality flag
    pub completeness: Option<f64>,
}

impl<'a> CategoryView<'a> {
    #[must_use]
    pub fn new(counts: &'a CountMap, completeness: Option<f64>) -> Self {
        Self {
            counts,
            completeness,
        }
    }

    fn completeness_below(&self, threshold: f64) -> bool {
        self.completeness.unwrap_or(1.0) < threshold
    }
}

/// Whether the race/ethnicity schema is checked against the reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaCheck<'a> {
    /// Schema is not available on this path; no flag is emitted
    #[default]
    Skip,
    /// Compare the given schema (possibly absent) to the reference
    Evaluate(Option<&'a str>),
}

/// Demographics of a cohort normalized for flag derivation
#[derive(Debug, Clone, Copy, Default)]
pub struct DemographicView<'a> {
    pub age: Option<CategoryView<'a>>,
    pub sex: Option<CategoryView<'a>>,
    pub race_ethnicity: Option<CategoryView<'a>>,
    pub race_schema: SchemaCheck<'a>,
}

fn share(part: u64, total: u64) -> f64 {
    part as f64 / total as f64
}

/// Threshold-based inequity flag derivation
#[derive(Debug, Clone)]
pub struct FlagEngine {
    thresholds: FlagThresholds,
    reference_schema: String,
}

impl Default for FlagEngine {
    fn default() -> Self {
        Self {
            thresholds: FlagThresholds::default(),
            reference_schema: REFERENCE_RACE_SCHEMA.to_string(),
        }
    }
}

impl FlagEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            reference_schema: config.reference_schema.clone(),
        }
    }

    /// Derive every flag for a cohort of `total_patients`
    #[must_use]
    pub fn derive(&self, view: &DemographicView<'_>, total_patients: u64) -> InequityFlags {
        let empty = CountMap::new();
        let missing = CategoryView::new(&empty, None);

        let age = view.age.unwrap_or(missing);
        let sex = view.sex.unwrap_or(missing);
        let race = view.race_ethnicity.unwrap_or(missing);
        let t = &self.thresholds;

        let flags = InequityFlags {
            age: self.age_flags(age.counts, total_patients),
            sex: self.sex_flags(sex.counts),
            race_ethnicity: self.race_flags(race.counts, total_patients, view.race_schema),
            data_quality: DataQualityFlags {
                low_age_completeness: age.completeness_below(t.min_age_completeness),
                low_sex_completeness: sex.completeness_below(t.min_sex_completeness),
                low_race_completeness: race.completeness_below(t.min_race_completeness),
            },
        };

        log::debug!(
            "Derived inequity flags over {} patients: {} raised",
            total_patients,
            flags.raised().len()
        );
        flags
    }

    fn age_flags(&self, bins: &CountMap, total: u64) -> AgeFlags {
        let t = &self.thresholds;
        let pediatric = bins.count("0-17");
        let younger = pediatric + bins.count("18-39");

        AgeFlags {
            missing_pediatric_population: pediatric == 0,
            younger_population_underrepresented: total > 0
                && share(younger, total) < t.younger_population_min_share,
            age_distribution_skewed: total > 0
                && bins
                    .values()
                    .any(|count| share(coalesce(*count), total) > t.age_bin_max_share),
        }
    }

    fn sex_flags(&self, counts: &CountMap) -> SexFlags {
        let t = &self.thresholds;
        let male = counts.count("male");
        let female = counts.count("female");
        let sex_total = male
            .saturating_add(female)
            .saturating_add(counts.count(UNKNOWN_KEY));

        let max_frac = if sex_total > 0 {
            share(male.max(female), sex_total)
        } else {
            0.0
        };

        SexFlags {
            sex_imbalance: max_frac > t.sex_imbalance_share,
            single_sex_dataset: max_frac > t.single_sex_share,
        }
    }

    fn race_flags(
        &self,
        counts: &CountMap,
        total: u64,
        schema: SchemaCheck<'_>,
    ) -> RaceEthnicityFlags {
        let t = &self.thresholds;
        let known = counts.without(&[UNKNOWN_KEY]);
        let known_total = known.total();
        let largest_group = known.values().map(|v| coalesce(*v)).max().unwrap_or(0);

        let unknown_frac = if total > 0 {
            share(counts.count(UNKNOWN_KEY), total)
        } else {
            0.0
        };

        RaceEthnicityFlags {
            race_majority_dominant: known_total > 0
                && share(largest_group, known_total) > t.race_majority_share,
            race_group_sparse: known
                .iter()
                .map(|(group, count)| (group, coalesce(*count) < t.race_sparse_count))
                .collect(),
            high_unknown_fraction: unknown_frac > t.race_unknown_max_share,
            non_standard_schema: match schema {
                SchemaCheck::Skip => None,
                SchemaCheck::Evaluate(name) => Some(name != Some(self.reference_schema.as_str())),
            },
        }
    }
}

/// Derive flags with the default thresholds
#[must_use]
pub fn derive_flags(view: &DemographicView<'_>, total_patients: u64) -> InequityFlags {
    FlagEngine::default().derive(view, total_patients)
}
