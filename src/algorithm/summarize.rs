//! Summarizing a cohort record
//!
//! Each demographic category is flattened into a single count mapping (age
//! bins become top-level entries, metadata such as `mean` or `schema` is
//! dropped) and reported with percentages and completeness over the cohort
//! total. Flags are then derived from the flattened counts.

use log::{debug, info};

use crate::algorithm::aggregate::{completeness, percentages};
use crate::algorithm::flags::{CategoryView, DemographicView, FlagEngine, SchemaCheck};
use crate::config::AuditConfig;
use crate::models::counts::{CountMap, KeyedMap};
use crate::models::demographics::{Category, UNKNOWN_KEY};
use crate::models::record::CohortRecord;
use crate::models::summary::{CategorySummary, SummaryRecord};

/// Flattened reported counts of one category; null counts are skipped
fn flatten_counts(record: &CohortRecord, category: Category) -> Option<CountMap> {
    let demographics = &record.demographics;
    match category {
        Category::Age => demographics
            .age
            .as_ref()
            .map(|age| age.bins.as_ref().map(reported_only).unwrap_or_default()),
        Category::Sex => demographics.sex.as_ref().map(|sex| reported_only(&sex.counts)),
        Category::RaceEthnicity => demographics
            .race_ethnicity
            .as_ref()
            .map(|race| reported_only(&race.counts)),
    }
}

fn reported_only(counts: &CountMap) -> CountMap {
    counts.reported().map(|(k, v)| (k, Some(v))).collect()
}

/// Keys not counted as reported: any spelling of `unknown`, except for age
/// where every bin is a reported value
fn unreported_keys(counts: &CountMap, category: Category) -> Vec<&str> {
    match category {
        Category::Age => Vec::new(),
        Category::Sex | Category::RaceEthnicity => counts
            .keys()
            .filter(|k| k.eq_ignore_ascii_case(UNKNOWN_KEY))
            .collect(),
    }
}

/// Summarize one category over `total_patients`
#[must_use]
pub fn summarize_category(
    counts: CountMap,
    category: Category,
    total_patients: u64,
) -> CategorySummary {
    let excluded = unreported_keys(&counts, category);
    let completeness = completeness(&counts, total_patients, &excluded);
    let percentages = percentages(&counts, total_patients);

    debug!(
        "Summarized {} with {} keys, completeness {}",
        category,
        counts.len(),
        completeness
    );

    CategorySummary {
        counts,
        percentages,
        completeness,
    }
}

/// Produces condensed summaries of cohort records
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    engine: FlagEngine,
}

impl Summarizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: &AuditConfig) -> Self {
        self.engine = FlagEngine::from_config(config);
        self
    }

    /// Summarize every category present in `record` and derive its flags
    #[must_use]
    pub fn summarize(&self, record: &CohortRecord) -> SummaryRecord {
        let total = record.total_patients();

        let demographics_summary: KeyedMap<CategorySummary> = record
            .demographics
            .present()
            .into_iter()
            .filter_map(|category| {
                flatten_counts(record, category)
                    .map(|counts| (category.name(), summarize_category(counts, category, total)))
            })
            .collect();

        let view_of = |category: Category| {
            demographics_summary
                .get(category.name())
                .map(|s| CategoryView::new(&s.counts, Some(s.completeness)))
        };
        let view = DemographicView {
            age: view_of(Category::Age),
            sex: view_of(Category::Sex),
            race_ethnicity: view_of(Category::RaceEthnicity),
            race_schema: SchemaCheck::Skip,
        };
        let inequity_flags = self.engine.derive(&view, total);

        info!(
            "Summarized {} ({} patients, {} categories)",
            record.id,
            total,
            demographics_summary.len()
        );

        SummaryRecord {
            id: record.id.clone(),
            name: record.name.clone(),
            n_patients: total,
            demographics_summary,
            inequity_flags,
        }
    }
}

/// Summarize a record with the default configuration
#[must_use]
pub fn summarize(record: &CohortRecord) -> SummaryRecord {
    Summarizer::default().summarize(record)
}
