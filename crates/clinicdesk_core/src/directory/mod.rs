//! External patient directory contract and implementations.
//!
//! # Responsibility
//! - Define the collaborator the list core delegates persistence to.
//! - Keep list/session code storage-agnostic.
//!
//! # Invariants
//! - Mutating calls report success or failure through `ActionResult`; they
//!   never panic and never return `Err`.
//! - `delete_patient` is not guaranteed idempotent: a second call for the
//!   same id may report failure.

pub mod memory;

use crate::model::draft::ValidatedDraft;
use crate::model::patient::Patient;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure of the initial fetch. Handling it is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Backing service could not be reached or refused the call.
    Unavailable(String),
    /// Backing service returned records that could not be decoded.
    InvalidData(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "patient directory unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid patient directory data: {message}"),
        }
    }
}

impl Error for DirectoryError {}

/// Result envelope of one create/update/delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Patient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    /// Success carrying the persisted record (create/update).
    pub fn with_record(record: Patient) -> Self {
        Self {
            success: true,
            record: Some(record),
            error: None,
        }
    }

    /// Success without a record (delete).
    pub fn done() -> Self {
        Self {
            success: true,
            record: None,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            record: None,
            error: Some(message.into()),
        }
    }
}

/// Collaborator performing the actual persistence of patient records.
pub trait PatientDirectory {
    fn fetch_patients(&self) -> DirectoryResult<Vec<Patient>>;
    fn create_patient(&self, draft: &ValidatedDraft) -> ActionResult;
    fn update_patient(&self, id: &str, draft: &ValidatedDraft) -> ActionResult;
    fn delete_patient(&self, id: &str) -> ActionResult;
}
