//! Core list-management logic for the clinicdesk admin dashboard.
//! This crate is the single source of truth for patient list invariants.

pub mod config;
pub mod directory;
pub mod list;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, ListConfig};
pub use directory::memory::MemoryPatientDirectory;
pub use directory::{ActionResult, DirectoryError, DirectoryResult, PatientDirectory};
pub use list::filter::{filter_patients, matches_query};
pub use list::paging::{
    check_page, page_bounds, page_buttons, page_slice, total_pages, PageRow, PageSize, PageView,
    PagingError,
};
pub use list::session::{
    ActionRequest, CrudKind, CrudOutcome, FormSurface, PatientListSession, PendingAction,
    SessionError,
};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogSettings};
pub use model::draft::{
    Attachment, DraftField, DraftValidationErrors, FieldError, PatientDraft, ValidatedDraft,
};
pub use model::patient::{
    BloodGroup, Gender, MaritalStatus, Occupation, Patient, PatientId, PatientValidationError,
};
pub use service::crud_dispatcher::CrudDispatcher;
pub use store::patient_store::{PatientStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
