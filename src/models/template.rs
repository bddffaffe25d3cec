//! Template cohort record
//!
//! The starting point curators fill in when describing a new collection, and
//! a realistic record for exercising the pipelines.

use serde_yaml::{Mapping, Value};

use crate::models::counts::CountMap;
use crate::models::demographics::{
    AGE_BINS, AgeCategory, Demographics, RaceEthnicityCategory, SexCategory,
};
use crate::models::record::{Cohort, CohortRecord, Provenance};

fn mapping(pairs: &[(&str, &str)]) -> Value {
    let mut map = Mapping::new();
    for (k, v) in pairs {
        map.insert(Value::from(*k), Value::from(*v));
    }
    Value::Mapping(map)
}

/// The `new_lung_ct` template record
#[must_use]
pub fn new_lung_ct() -> CohortRecord {
    let bins: CountMap = AGE_BINS
        .into_iter()
        .zip([10, 54, 20, 662, 197])
        .map(|(bin, count)| (bin, Some(count)))
        .collect();

    let sex: CountMap = [("male", Some(222)), ("female", Some(131)), ("unknown", Some(0))]
        .into_iter()
        .collect();

    let race: CountMap = [
        ("white", Some(612)),
        ("black", Some(113)),
        ("asian", Some(44)),
        ("hispanic", Some(16)),
        ("other", Some(34)),
        ("unknown", Some(44)),
    ]
    .into_iter()
    .collect();

    CohortRecord {
        id: "new_lung_ct".to_string(),
        name: "New Lung CT Collection".to_string(),
        source: Some(mapping(&[
            ("organization", "National Cancer Institute"),
            ("url", "https://www.cancerimagingarchive.net/"),
            ("license", "CC BY 4.0"),
        ])),
        domain: Some(mapping(&[
            ("modality", "CT"),
            ("anatomy", "Lung"),
            ("task", "Diagnosis"),
        ])),
        cohort: Cohort {
            n_patients: 1243,
            n_images: Some(38920),
            sites: Some(7),
            countries: vec!["US".to_string()],
        },
        demographics: Demographics {
            age: Some(AgeCategory {
                mean: Some(63.4),
                std: Some(9.8),
                bins: Some(bins),
                percentages: None,
                completeness: Some(0.97),
            }),
            sex: Some(SexCategory {
                completeness: Some(1.0),
                ..SexCategory::from_counts(sex)
            }),
            race_ethnicity: Some(RaceEthnicityCategory {
                completeness: Some(0.92),
                ..RaceEthnicityCategory::from_counts(race, Some("NIH_OMB_1997".to_string()))
            }),
        },
        provenance: Some(Provenance {
            derived_from: vec![mapping(&[
                ("publication", "Smith et al. 2021"),
                ("doi", "10.1234/example"),
            ])],
            notes: Some("Demographics extracted from Table 1 of primary publication.".to_string()),
        }),
        inequity_flags: None,
    }
}
