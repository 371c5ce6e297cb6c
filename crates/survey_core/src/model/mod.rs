//! Domain model for surveys and email invitations.
//!
//! # Responsibility
//! - Define the survey record and the invitation state machine.
//!
//! # Invariants
//! - A survey references its question set by id only; the set lives in the
//!   assessment service and is never persisted here.
//! - Invitation status only moves forward (`Pending` -> `Completed` or
//!   `Pending` -> `Expired`); `Expired` is terminal.

pub mod email;
pub mod survey;
