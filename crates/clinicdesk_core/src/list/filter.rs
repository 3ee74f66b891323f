//! Free-text patient filter.
//!
//! Name and gender are matched case-insensitively. Display id and phone are
//! matched as literal substrings since they are numeric or alphanumeric.

use crate::model::patient::Patient;

/// Returns whether `patient` matches `query` in at least one searchable field.
///
/// An empty query matches every patient.
pub fn matches_query(patient: &Patient, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let folded = query.to_lowercase();

    patient.name.to_lowercase().contains(&folded)
        || patient.patient_id.contains(query)
        || patient.phone.contains(query)
        || patient.gender.as_str().to_lowercase().contains(&folded)
}

/// Returns the ordered subsequence of `patients` matching `query`.
pub fn filter_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|patient| matches_query(patient, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_patients, matches_query};
    use crate::model::patient::{Gender, Patient};

    fn patient(name: &str, patient_id: &str, phone: &str, gender: Gender) -> Patient {
        Patient::new(format!("id-{patient_id}"), patient_id, name, phone, gender, 40)
            .expect("fixture patient should be valid")
    }

    #[test]
    fn display_id_is_matched_literally() {
        let record = patient("Ravi", "PT-abc", "9000000001", Gender::Male);
        assert!(matches_query(&record, "PT-abc"));
        assert!(!matches_query(&record, "pt-ABC"));
    }

    #[test]
    fn gender_is_matched_case_insensitively() {
        let record = patient("Ravi", "PT-1", "9000000001", Gender::Female);
        assert!(matches_query(&record, "fem"));
        assert!(matches_query(&record, "MALE"));
    }

    #[test]
    fn filtered_view_keeps_store_order() {
        let records = vec![
            patient("Zed", "PT-1", "111", Gender::Male),
            patient("Amy", "PT-2", "222", Gender::Female),
            patient("Zoe", "PT-3", "333", Gender::Female),
        ];
        let names = filter_patients(&records, "z")
            .into_iter()
            .map(|record| record.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Zed", "Zoe"]);
    }
}
