//! Configuration for cohort auditing.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_open_file;

/// Classification standard accepted for race/ethnicity counts
pub const REFERENCE_RACE_SCHEMA: &str = "NIH_OMB_1997";

/// Provenance note written into every combined record
pub const COMBINED_NOTES: &str = "Combined demographics from multiple cohorts.";

/// Thresholds used to raise inequity flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagThresholds {
    /// Share of patients aged under 40 below which younger patients are underrepresented
    pub younger_population_min_share: f64,
    /// Share of a single age bin above which the distribution is skewed
    pub age_bin_max_share: f64,
    /// Age completeness below which data quality is flagged
    pub min_age_completeness: f64,
    /// Majority sex share above which the cohort is imbalanced
    pub sex_imbalance_share: f64,
    /// Majority sex share above which the cohort is effectively single-sex
    pub single_sex_share: f64,
    /// Sex completeness below which data quality is flagged
    pub min_sex_completeness: f64,
    /// Share of the largest known group above which it dominates
    pub race_majority_share: f64,
    /// Group size below which a known group is sparse
    pub race_sparse_count: u64,
    /// Share of unknown race/ethnicity above which the cohort is flagged
    pub race_unknown_max_share: f64,
    /// Race/ethnicity completeness below which data quality is flagged
    pub min_race_completeness: f64,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            younger_population_min_share: 0.10,
            age_bin_max_share: 0.60,
            min_age_completeness: 0.95,
            sex_imbalance_share: 0.70,
            single_sex_share: 0.90,
            min_sex_completeness: 0.99,
            race_majority_share: 0.75,
            race_sparse_count: 30,
            race_unknown_max_share: 0.05,
            min_race_completeness: 0.95,
        }
    }
}

/// How the combiner treats two records with different race/ethnicity schemas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Keep the first record's schema and log a warning
    #[default]
    Inherit,
    /// Refuse to combine
    Strict,
}

/// Configuration shared by the combiner and the summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Inequity flag thresholds
    pub thresholds: FlagThresholds,
    /// Race/ethnicity schema considered standard
    pub reference_schema: String,
    /// Notes written to the provenance of combined records
    pub combined_notes: String,
    /// Schema mismatch handling when combining
    pub schema_policy: SchemaPolicy,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            thresholds: FlagThresholds::default(),
            reference_schema: REFERENCE_RACE_SCHEMA.to_string(),
            combined_notes: COMBINED_NOTES.to_string(),
            schema_policy: SchemaPolicy::Inherit,
        }
    }
}

impl AuditConfig {
    /// Load a configuration from a YAML file; absent fields keep their defaults
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "loading audit configuration")?;
        let config: Self = serde_yaml::from_reader(file)?;
        log::debug!("Loaded audit configuration from {}", path.display());
        Ok(config)
    }
}

impl fmt::Display for AuditConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.thresholds;
        writeln!(f, "Audit Configuration:")?;
        writeln!(f, "  Reference Schema: {}", self.reference_schema)?;
        writeln!(f, "  Schema Policy: {:?}", self.schema_policy)?;
        writeln!(f, "  Younger Population Min Share: {}", t.younger_population_min_share)?;
        writeln!(f, "  Age Bin Max Share: {}", t.age_bin_max_share)?;
        writeln!(f, "  Min Age Completeness: {}", t.min_age_completeness)?;
        writeln!(f, "  Sex Imbalance Share: {}", t.sex_imbalance_share)?;
        writeln!(f, "  Single Sex Share: {}", t.single_sex_share)?;
        writeln!(f, "  Min Sex Completeness: {}", t.min_sex_completeness)?;
        writeln!(f, "  Race Majority Share: {}", t.race_majority_share)?;
        writeln!(f, "  Race Sparse Count: {}", t.race_sparse_count)?;
        writeln!(f, "  Race Unknown Max Share: {}", t.race_unknown_max_share)?;
        writeln!(f, "  Min Race Completeness: {}", t.min_race_completeness)?;
        Ok(())
    }
}
