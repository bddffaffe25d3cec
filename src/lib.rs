//! A Rust library for combining and auditing the demographic composition of
//! medical imaging dataset cohorts.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{AuditConfig, FlagThresholds, SchemaPolicy};
pub use error::{AuditError, Result};
pub use models::{CohortRecord, InequityFlags, SummaryRecord};

// Pipelines
pub use algorithm::{Combiner, FlagEngine, Summarizer, combine, derive_flags, summarize};

// Record files
pub use loader::{load_record, parse_record, record_from_str, write_record};
