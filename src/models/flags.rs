//! Inequity flag models
//!
//! Flags are grouped the way they are reported: one group per demographic
//! category plus a `data_quality` group. Data-quality flags only appear in
//! emitted records when they are raised.

use serde::{Deserialize, Serialize};

use crate::models::counts::KeyedMap;

/// Age distribution flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeFlags {
    pub missing_pediatric_population: bool,
    pub younger_population_underrepresented: bool,
    pub age_distribution_skewed: bool,
}

/// Sex distribution flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexFlags {
    pub sex_imbalance: bool,
    pub single_sex_dataset: bool,
}

/// Race/ethnicity distribution flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceEthnicityFlags {
    pub race_majority_dominant: bool,
    /// Per known group: whether the group is too small to analyse
    pub race_group_sparse: KeyedMap<bool>,
    pub high_unknown_fraction: bool,
    /// Only evaluated when combining full records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_standard_schema: Option<bool>,
}

/// Completeness flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_age_completeness: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_sex_completeness: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub low_race_completeness: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Full set of inequity flags for one cohort
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InequityFlags {
    pub age: AgeFlags,
    pub sex: SexFlags,
    pub race_ethnicity: RaceEthnicityFlags,
    pub data_quality: DataQualityFlags,
}

impl InequityFlags {
    /// Dotted names of every raised flag, e.g. `race_ethnicity.race_group_sparse.asian`
    #[must_use]
    pub fn raised(&self) -> Vec<String> {
        let mut raised = Vec::new();
        let mut push = |group: &str, name: &str, value: bool| {
            if value {
                raised.push(format!("{group}.{name}"));
            }
        };

        push("age", "missing_pediatric_population", self.age.missing_pediatric_population);
        push(
            "age",
            "younger_population_underrepresented",
            self.age.younger_population_underrepresented,
        );
        push("age", "age_distribution_skewed", self.age.age_distribution_skewed);
        push("sex", "sex_imbalance", self.sex.sex_imbalance);
        push("sex", "single_sex_dataset", self.sex.single_sex_dataset);

        let race = &self.race_ethnicity;
        push("race_ethnicity", "race_majority_dominant", race.race_majority_dominant);
        for (group, sparse) in race.race_group_sparse.iter() {
            push("race_ethnicity.race_group_sparse", group, *sparse);
        }
        push("race_ethnicity", "high_unknown_fraction", race.high_unknown_fraction);
        push(
            "race_ethnicity",
            "non_standard_schema",
            race.non_standard_schema.unwrap_or(false),
        );

        let quality = self.data_quality;
        push("data_quality", "low_age_completeness", quality.low_age_completeness);
        push("data_quality", "low_sex_completeness", quality.low_sex_completeness);
        push("data_quality", "low_race_completeness", quality.low_race_completeness);

        raised
    }
}
