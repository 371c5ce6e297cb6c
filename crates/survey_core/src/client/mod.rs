//! Remote assessment-service access.
//!
//! # Responsibility
//! - Define the only contract through which the survey core sees
//!   assessment data.
//!
//! # Invariants
//! - Fetches are synchronous and never cached; every consolidated view is
//!   rebuilt from a fresh call.
//! - Set absence is a distinct signal from transport failure.

pub mod set_client;
