//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate directory calls into use-case level APIs.
//! - Keep UI layers decoupled from persistence details.

pub mod crud_dispatcher;
