//! Combining two cohort records
//!
//! Counts are summed per key and every derived statistic (percentages,
//! completeness, flags) is recomputed over the merged total. Derived fields
//! of the inputs are never summed.

use itertools::Itertools;
use log::{info, warn};

use crate::algorithm::aggregate::{
    checked_total, coalesce, completeness, percentages, sum_counts, weighted_mean,
};
use crate::algorithm::flags::{CategoryView, DemographicView, FlagEngine, SchemaCheck};
use crate::config::{AuditConfig, SchemaPolicy};
use crate::error::{AuditError, Result};
use crate::models::demographics::{
    AgeCategory, Category, Demographics, RaceEthnicityCategory, SexCategory,
};
use crate::models::record::{Cohort, CohortRecord, Provenance};

fn require<'r, T>(value: Option<&'r T>, field: &str) -> Result<&'r T> {
    value.ok_or_else(|| AuditError::missing(field))
}

/// Merges cohort records into one
#[derive(Debug, Clone)]
pub struct Combiner {
    config: AuditConfig,
    engine: FlagEngine,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Combiner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AuditConfig::default(),
            engine: FlagEngine::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.engine = FlagEngine::from_config(&config);
        self.config = config;
        self
    }

    /// Combine `a` and `b` into a new record; `a` wins for metadata
    pub fn combine(&self, a: &CohortRecord, b: &CohortRecord) -> Result<CohortRecord> {
        let n1 = a.total_patients();
        let n2 = b.total_patients();
        let total = checked_total([n1, n2], "cohort.n_patients")?;

        let age = Self::combine_age(a, b, total)?;
        let sex = Self::combine_sex(a, b, total)?;
        let race_ethnicity = self.combine_race(a, b, total)?;

        let demographics = Demographics {
            age: Some(age),
            sex: Some(sex),
            race_ethnicity: Some(race_ethnicity),
        };
        let inequity_flags = self.engine.derive(&flag_view(&demographics), total);

        let combined = CohortRecord {
            id: format!("{}+{}", a.id, b.id),
            name: format!("{} + {}", a.name, b.name),
            source: a.source.clone(),
            domain: a.domain.clone(),
            cohort: Cohort {
                n_patients: total,
                n_images: Some(checked_total(
                    [coalesce(a.cohort.n_images), coalesce(b.cohort.n_images)],
                    "cohort.n_images",
                )?),
                sites: None,
                countries: a
                    .cohort
                    .countries
                    .iter()
                    .chain(&b.cohort.countries)
                    .cloned()
                    .sorted()
                    .dedup()
                    .collect(),
            },
            demographics,
            provenance: Some(Provenance {
                derived_from: a.citations().iter().chain(b.citations()).cloned().collect(),
                notes: Some(self.config.combined_notes.clone()),
            }),
            inequity_flags: Some(inequity_flags),
        };

        info!(
            "Combined {} ({} patients) and {} ({} patients) into {}",
            a.id, n1, b.id, n2, combined.id
        );
        Ok(combined)
    }

    fn combine_age(a: &CohortRecord, b: &CohortRecord, total: u64) -> Result<AgeCategory> {
        let age1 = require(a.demographics.age.as_ref(), "demographics.age")?;
        let age2 = require(b.demographics.age.as_ref(), "demographics.age")?;
        let (n1, n2) = (a.total_patients(), b.total_patients());

        let moment = |field: &str, v1: Option<f64>, v2: Option<f64>| -> Result<f64> {
            let path = format!("demographics.age.{field}");
            let v1 = v1.ok_or_else(|| AuditError::missing(path.clone()))?;
            let v2 = v2.ok_or_else(|| AuditError::missing(path.clone()))?;
            weighted_mean(v1, n1, v2, n2).ok_or(AuditError::ZeroWeight { field: path })
        };

        let mean = moment("mean", age1.mean, age2.mean)?;
        let std = moment("std", age1.std, age2.std)?;

        let bins = sum_counts([
            require(age1.bins.as_ref(), "demographics.age.bins")?,
            require(age2.bins.as_ref(), "demographics.age.bins")?,
        ])?;

        Ok(AgeCategory {
            mean: Some(mean),
            std: Some(std),
            percentages: Some(percentages(&bins, total)),
            completeness: Some(completeness(
                &bins,
                total,
                Category::Age.excluded_from_completeness(),
            )),
            bins: Some(bins),
        })
    }

    fn combine_sex(a: &CohortRecord, b: &CohortRecord, total: u64) -> Result<SexCategory> {
        let sex1 = require(a.demographics.sex.as_ref(), "demographics.sex")?;
        let sex2 = require(b.demographics.sex.as_ref(), "demographics.sex")?;

        let counts = sum_counts([&sex1.counts, &sex2.counts])?;
        Ok(SexCategory {
            percentages: Some(percentages(&counts, total)),
            completeness: Some(completeness(
                &counts,
                total,
                Category::Sex.excluded_from_completeness(),
            )),
            counts,
        })
    }

    fn combine_race(
        &self,
        a: &CohortRecord,
        b: &CohortRecord,
        total: u64,
    ) -> Result<RaceEthnicityCategory> {
        let race1 = require(a.demographics.race_ethnicity.as_ref(), "demographics.race_ethnicity")?;
        let race2 = require(b.demographics.race_ethnicity.as_ref(), "demographics.race_ethnicity")?;

        if race1.schema != race2.schema {
            let first = race1.schema.clone().unwrap_or_else(|| "<none>".to_string());
            let second = race2.schema.clone().unwrap_or_else(|| "<none>".to_string());
            match self.config.schema_policy {
                SchemaPolicy::Strict => return Err(AuditError::SchemaMismatch { first, second }),
                SchemaPolicy::Inherit => warn!(
                    "Race/ethnicity schemas differ ({} vs {}), keeping {} from {}",
                    first, second, first, a.id
                ),
            }
        }

        let counts = sum_counts([&race1.counts, &race2.counts])?;
        Ok(RaceEthnicityCategory {
            percentages: Some(percentages(&counts, total)),
            schema: race1.schema.clone(),
            completeness: Some(completeness(
                &counts,
                total,
                Category::RaceEthnicity.excluded_from_completeness(),
            )),
            counts,
        })
    }
}

/// Flag view over full category records, with the schema check enabled
fn flag_view(demographics: &Demographics) -> DemographicView<'_> {
    DemographicView {
        age: demographics
            .age
            .as_ref()
            .and_then(|age| age.bins.as_ref().map(|bins| CategoryView::new(bins, age.completeness))),
        sex: demographics
            .sex
            .as_ref()
            .map(|sex| CategoryView::new(&sex.counts, sex.completeness)),
        race_ethnicity: demographics
            .race_ethnicity
            .as_ref()
            .map(|race| CategoryView::new(&race.counts, race.completeness)),
        race_schema: SchemaCheck::Evaluate(
            demographics
                .race_ethnicity
                .as_ref()
                .and_then(|race| race.schema.as_deref()),
        ),
    }
}

/// Combine two records with the default configuration
pub fn combine(a: &CohortRecord, b: &CohortRecord) -> Result<CohortRecord> {
    Combiner::default().combine(a, b)
}
