//! Patient domain model and intake drafts.
//!
//! # Responsibility
//! - Define canonical data structures used by the list core.
//! - Keep raw form input separate from validated, typed drafts.
//!
//! # Invariants
//! - Every stored patient is identified by a directory-assigned `PatientId`.
//! - Drafts reach the dispatcher only after `PatientDraft::validate()`.

pub mod draft;
pub mod patient;
