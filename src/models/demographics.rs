//! Demographic category models
//!
//! A cohort record describes its population through up to three fixed
//! categories: age, sex and race/ethnicity. Each category holds raw counts
//! plus the derived `percentages` and `completeness` fields that are
//! recomputed whenever a record is combined.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::counts::{CountMap, PercentMap};

/// Fixed, ordered age bin labels
pub const AGE_BINS: [&str; 5] = ["0-17", "18-39", "40-59", "60-79", "80+"];

/// Key holding the count of patients with no reported value
pub const UNKNOWN_KEY: &str = "unknown";

/// The three demographic categories a record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Age,
    Sex,
    RaceEthnicity,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Age, Category::Sex, Category::RaceEthnicity];

    /// Key used for the category in record files
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::RaceEthnicity => "race_ethnicity",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Keys excluded from the completeness numerator
    #[must_use]
    pub fn excluded_from_completeness(self) -> &'static [&'static str] {
        match self {
            Self::Age => &[],
            Self::Sex | Self::RaceEthnicity => &[UNKNOWN_KEY],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Age distribution of a cohort
///
/// Fields other than the moments, `bins` and the derived fields are ignored
/// when reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<CountMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<PercentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
}

/// Sex distribution of a cohort (`male`, `female`, `unknown`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SexCategory {
    #[serde(flatten)]
    pub counts: CountMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<PercentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
}

/// Race/ethnicity distribution of a cohort under a named classification schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceEthnicityCategory {
    #[serde(flatten)]
    pub counts: CountMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<PercentMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
}

impl SexCategory {
    #[must_use]
    pub fn from_counts(counts: CountMap) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }
}

impl RaceEthnicityCategory {
    #[must_use]
    pub fn from_counts(counts: CountMap, schema: Option<String>) -> Self {
        Self {
            counts,
            schema,
            ..Self::default()
        }
    }
}

/// Demographic composition of a cohort
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demographics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<SexCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_ethnicity: Option<RaceEthnicityCategory>,
}

impl Demographics {
    /// Categories present in this record, in fixed order
    #[must_use]
    pub fn present(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| match c {
                Category::Age => self.age.is_some(),
                Category::Sex => self.sex.is_some(),
                Category::RaceEthnicity => self.race_ethnicity.is_some(),
            })
            .collect()
    }
}
