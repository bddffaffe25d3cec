use cohort_audit::CohortRecord;
use cohort_audit::models::template::new_lung_ct;

/// A 943-patient cohort whose demographics fully account for every patient's age
#[must_use]
pub fn tcia_lung_ct() -> CohortRecord {
    let mut record = new_lung_ct();
    record.id = "tcia_lung_ct".to_string();
    record.name = "TCIA Lung CT".to_string();
    record.cohort.n_patients = 943;
    record.cohort.n_images = Some(251_135);
    record.cohort.sites = Some(3);
    record.cohort.countries = vec!["US".to_string(), "NL".to_string()];
    if let Some(age) = record.demographics.age.as_mut() {
        age.mean = Some(66.0);
        age.std = Some(10.4);
    }
    record
}
