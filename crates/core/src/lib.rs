//! CodaBrate domain logic.
//!
//! Pure building blocks shared by the persistence and API layers:
//!
//! - [`error::CoreError`] — the domain error taxonomy.
//! - [`application`] — the application-approval state machine.
//! - [`project`] — project lifecycle status policy.
//! - [`access`] — vault visibility and conversation authorization predicates.
//! - [`identity`] — registration validation (institutional email, username).
//! - [`conversation`] — inbox construction and thread de-duplication.
//!
//! Nothing in this crate performs I/O; every function is a pure function of
//! its inputs so the invariants are unit-testable without a database.

pub mod access;
pub mod application;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod project;
pub mod types;
