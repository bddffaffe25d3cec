//! Domain models for cohort auditing
//!
//! This module contains the record shapes consumed and produced by the
//! combiner and the summarizer.

pub mod counts;
pub mod demographics;
pub mod flags;
pub mod record;
pub mod summary;
pub mod template;

// Re-export commonly used types
pub use counts::{CountMap, KeyedMap, PercentMap, coalesce};
pub use demographics::{
    AGE_BINS, AgeCategory, Category, Demographics, RaceEthnicityCategory, SexCategory,
    UNKNOWN_KEY,
};
pub use flags::{AgeFlags, DataQualityFlags, InequityFlags, RaceEthnicityFlags, SexFlags};
pub use record::{Cohort, CohortRecord, Provenance};
pub use summary::{CategorySummary, SummaryRecord};
