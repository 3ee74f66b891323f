//! In-memory patient directory.
//!
//! Used by the CLI demo and tests. Identity and `created_at` are assigned
//! here, mirroring what a real backing service does.

use crate::directory::{ActionResult, DirectoryError, DirectoryResult, PatientDirectory};
use crate::model::draft::ValidatedDraft;
use crate::model::patient::{now_epoch_ms, Patient, PatientId};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use uuid::Uuid;

/// Single-threaded in-memory directory with scriptable failures.
#[derive(Debug, Default)]
pub struct MemoryPatientDirectory {
    records: RefCell<Vec<Patient>>,
    scripted_failures: RefCell<VecDeque<String>>,
    calls: Cell<usize>,
}

impl MemoryPatientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the directory with already persisted records.
    pub fn with_records(records: Vec<Patient>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Makes the next call (of any kind) fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.scripted_failures.borrow_mut().push_back(message.into());
    }

    /// Number of calls received so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    /// Snapshot of persisted records.
    pub fn snapshot(&self) -> Vec<Patient> {
        self.records.borrow().clone()
    }

    fn begin_call(&self) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.scripted_failures.borrow_mut().pop_front()
    }
}

impl PatientDirectory for MemoryPatientDirectory {
    fn fetch_patients(&self) -> DirectoryResult<Vec<Patient>> {
        if let Some(message) = self.begin_call() {
            return Err(DirectoryError::Unavailable(message));
        }
        Ok(self.records.borrow().clone())
    }

    fn create_patient(&self, draft: &ValidatedDraft) -> ActionResult {
        if let Some(message) = self.begin_call() {
            return ActionResult::failed(message);
        }
        let patient = match patient_from_draft(Uuid::new_v4().to_string(), draft, now_epoch_ms())
        {
            Ok(patient) => patient,
            Err(message) => return ActionResult::failed(message),
        };
        self.records.borrow_mut().push(patient.clone());
        ActionResult::with_record(patient)
    }

    fn update_patient(&self, id: &str, draft: &ValidatedDraft) -> ActionResult {
        if let Some(message) = self.begin_call() {
            return ActionResult::failed(message);
        }
        let mut records = self.records.borrow_mut();
        let Some(existing) = records.iter_mut().find(|record| record.id == id) else {
            return ActionResult::failed(format!("patient not found: {id}"));
        };
        let updated = match patient_from_draft(existing.id.clone(), draft, existing.created_at) {
            Ok(mut patient) => {
                patient.medical_history = existing.medical_history.clone();
                patient.allergies = existing.allergies.clone();
                patient
            }
            Err(message) => return ActionResult::failed(message),
        };
        *existing = updated.clone();
        ActionResult::with_record(updated)
    }

    fn delete_patient(&self, id: &str) -> ActionResult {
        if let Some(message) = self.begin_call() {
            return ActionResult::failed(message);
        }
        let mut records = self.records.borrow_mut();
        match records.iter().position(|record| record.id == id) {
            Some(index) => {
                records.remove(index);
                ActionResult::done()
            }
            None => ActionResult::failed(format!("patient not found: {id}")),
        }
    }
}

fn patient_from_draft(
    id: PatientId,
    draft: &ValidatedDraft,
    created_at: i64,
) -> Result<Patient, String> {
    let mut patient = Patient::new(
        id,
        draft.patient_id.clone(),
        draft.full_name(),
        draft.mobile_number.clone(),
        draft.gender,
        draft.age,
    )
    .map_err(|err| err.to_string())?
    .with_created_at(created_at);
    patient.email = draft.email.clone();
    patient.address = draft.composed_address();
    patient.marital_status = Some(draft.marital_status);
    patient.occupation = draft.occupation;
    patient.blood_group = Some(draft.blood_group);
    patient.blood_pressure = draft.blood_pressure.clone();
    patient.sugar_levels = draft.sugar_levels.clone();
    Ok(patient)
}
