//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed-store contract for question-set aggregates.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Aggregates are loaded whole and saved whole; child rows are never
//!   mutated outside their owning set's transaction.
//! - Repository APIs return semantic errors (`SetNotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod set_repo;
