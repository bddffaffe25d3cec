//! Summary record model
//!
//! A condensed view of a cohort record: flat counts, percentages and
//! completeness per demographic category, plus inequity flags.

use serde::{Deserialize, Serialize};

use crate::models::counts::{CountMap, KeyedMap, PercentMap};
use crate::models::demographics::{
    AgeCategory, Category, Demographics, RaceEthnicityCategory, SexCategory,
};
use crate::models::flags::InequityFlags;
use crate::models::record::{Cohort, CohortRecord};

/// Flattened statistics for one demographic category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Reported counts; age bins are unpacked to top-level keys
    pub counts: CountMap,
    pub percentages: PercentMap,
    pub completeness: f64,
}

/// Condensed summary of one cohort record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: String,
    pub name: String,
    pub n_patients: u64,
    pub demographics_summary: KeyedMap<CategorySummary>,
    pub inequity_flags: InequityFlags,
}

impl SummaryRecord {
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategorySummary> {
        self.demographics_summary.get(category.name())
    }

    /// Rebuild a minimal cohort record from the summarized counts
    ///
    /// Every age count goes back into `bins`, since summarized age counts are
    /// the unpacked bins. The race schema and age moments are not part of a
    /// summary and stay unset.
    #[must_use]
    pub fn to_cohort_record(&self) -> CohortRecord {
        let mut demographics = Demographics::default();

        for (name, summary) in self.demographics_summary.iter() {
            match Category::from_name(name) {
                Some(Category::Age) => {
                    demographics.age = Some(AgeCategory {
                        bins: Some(summary.counts.clone()),
                        ..AgeCategory::default()
                    });
                }
                Some(Category::Sex) => {
                    demographics.sex = Some(SexCategory::from_counts(summary.counts.clone()));
                }
                Some(Category::RaceEthnicity) => {
                    demographics.race_ethnicity =
                        Some(RaceEthnicityCategory::from_counts(summary.counts.clone(), None));
                }
                None => log::debug!("Skipping unrecognised summary category {name}"),
            }
        }

        CohortRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            cohort: Cohort {
                n_patients: self.n_patients,
                ..Cohort::default()
            },
            demographics,
            ..CohortRecord::default()
        }
    }
}
