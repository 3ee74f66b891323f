//! Client-side record store.
//!
//! # Responsibility
//! - Hold the session's in-memory patient list as fetched from a directory.
//! - Apply confirmed CRUD results as single insert/replace/remove steps.
//!
//! # Invariants
//! - Ids are unique within a store.
//! - Mutations never reorder unaffected records.
//! - A stored record's `created_at` is never overwritten.

pub mod patient_store;
