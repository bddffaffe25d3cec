//! Algorithm implementations for cohort auditing
//!
//! This module contains the aggregation primitives, the inequity flag
//! engine, and the two pipelines built on them: combining records and
//! summarizing a record.

pub mod aggregate;
pub mod combine;
pub mod flags;
pub mod summarize;

pub use combine::{Combiner, combine};
pub use flags::{CategoryView, DemographicView, FlagEngine, SchemaCheck, derive_flags};
pub use summarize::{Summarizer, summarize};
