//! List derivations and the list session state machine.
//!
//! # Responsibility
//! - Derive filtered and paginated views from a store snapshot.
//! - Track query, page, page size, form surface and in-flight CRUD actions.
//!
//! # Invariants
//! - Filtered views keep store order and only contain store records.
//! - Paginated views are contiguous slices of the filtered view.
//! - The current page is reset to 1 on every query, page size or store change.

pub mod filter;
pub mod paging;
pub mod session;
