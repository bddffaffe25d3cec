//! Cohort record entity model
//!
//! A `CohortRecord` describes one medical-imaging dataset: who published it,
//! what it images, how many patients it covers, and how those patients are
//! distributed demographically.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::models::demographics::Demographics;
use crate::models::flags::InequityFlags;

/// Read an explicit null the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Patient totals are structural; null is as missing as an absent key
fn required_patients<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Option::<u64>::deserialize(deserializer)?.ok_or_else(|| D::Error::missing_field("n_patients"))
}

/// Size and geography of a cohort
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    /// Number of patients in the cohort
    #[serde(deserialize_with = "required_patients")]
    pub n_patients: u64,
    /// Number of images in the cohort
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_images: Option<u64>,
    /// Number of contributing sites, if known
    pub sites: Option<u64>,
    /// Countries patients were recruited in
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
}

/// Where the demographic figures came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Citation records, in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub derived_from: Vec<Value>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Root record for one dataset
///
/// `inequity_flags` are derived data and are never read from input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortRecord {
    pub id: String,
    pub name: String,
    /// Publishing organisation metadata, carried through unmodified
    pub source: Option<Value>,
    /// Modality/anatomy/task metadata, carried through unmodified
    pub domain: Option<Value>,
    pub cohort: Cohort,
    #[serde(default, deserialize_with = "null_as_default")]
    pub demographics: Demographics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none", skip_deserializing)]
    pub inequity_flags: Option<InequityFlags>,
}

impl CohortRecord {
    /// Total patient count, the denominator of every derived statistic
    #[must_use]
    pub fn total_patients(&self) -> u64 {
        self.cohort.n_patients
    }

    /// Citations this record derives from, empty when there is no provenance
    #[must_use]
    pub fn citations(&self) -> &[Value] {
        self.provenance
            .as_ref()
            .map(|p| p.derived_from.as_slice())
            .unwrap_or(&[])
    }
}
