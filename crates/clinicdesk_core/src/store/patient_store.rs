//! Ordered, id-unique patient store.

use crate::model::patient::{Patient, PatientValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised when loading records into a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Two fetched records share the same id.
    DuplicateId(String),
    /// A fetched record violates record invariants.
    Invalid(PatientValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate patient id in store: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateId(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<PatientValidationError> for StoreError {
    fn from(value: PatientValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// In-memory patient list owned by one list session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientStore {
    records: Vec<Patient>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from fetched records, keeping fetch order.
    ///
    /// # Errors
    /// - `StoreError::Invalid` when a record fails `Patient::validate()`.
    /// - `StoreError::DuplicateId` when two records share an id.
    pub fn from_records(records: Vec<Patient>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Patient] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Appends a new record.
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` when the id is already stored; the store
    ///   is left unchanged.
    pub fn insert(&mut self, patient: Patient) -> StoreResult<()> {
        if self.contains(&patient.id) {
            return Err(StoreError::DuplicateId(patient.id));
        }
        self.records.push(patient);
        Ok(())
    }

    /// Replaces an existing record in place. Returns `false` when the id is
    /// gone.
    ///
    /// The stored `created_at` always wins over the incoming one.
    pub fn replace(&mut self, mut patient: Patient) -> bool {
        match self.position(&patient.id) {
            Some(index) => {
                patient.created_at = self.records[index].created_at;
                self.records[index] = patient;
                true
            }
            None => false,
        }
    }

    /// Removes exactly the record with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<Patient> {
        self.position(id).map(|index| self.records.remove(index))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{PatientStore, StoreError};
    use crate::model::patient::{Gender, Patient};

    fn patient(id: &str, name: &str) -> Patient {
        Patient::new(id, format!("PT-{id}"), name, "9876543210", Gender::Other, 30)
            .expect("valid patient")
    }

    #[test]
    fn from_records_rejects_duplicate_ids() {
        let err = PatientStore::from_records(vec![patient("a", "Ann"), patient("a", "Bob")])
            .expect_err("duplicate ids must be rejected");
        assert_eq!(err, StoreError::DuplicateId("a".to_string()));
    }

    #[test]
    fn insert_appends_and_rejects_existing_ids() {
        let mut store = PatientStore::from_records(vec![patient("a", "Ann"), patient("b", "Bob")])
            .expect("store should load");

        store.insert(patient("c", "Cid")).expect("new id should insert");
        let err = store
            .insert(patient("a", "Someone Else"))
            .expect_err("existing id must be rejected");
        assert_eq!(err, StoreError::DuplicateId("a".to_string()));

        let names = store
            .records()
            .iter()
            .map(|record| record.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn replace_keeps_position_and_created_at() {
        let mut store = PatientStore::from_records(vec![
            patient("a", "Ann").with_created_at(1001),
            patient("b", "Bob").with_created_at(1002),
        ])
        .expect("store should load");

        assert!(store.replace(patient("a", "Anna").with_created_at(999_999)));
        assert!(!store.replace(patient("z", "Zed")));

        let first = &store.records()[0];
        assert_eq!(first.name, "Anna");
        assert_eq!(first.created_at, 1001);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_only_touches_the_matching_record() {
        let mut store = PatientStore::from_records(vec![
            patient("a", "Ann"),
            patient("b", "Bob"),
            patient("c", "Cid"),
        ])
        .expect("store should load");

        assert!(store.remove("b").is_some());
        assert!(store.remove("b").is_none());
        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(store.contains("c"));
    }
}
