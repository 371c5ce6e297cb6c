//! Survey orchestration use-cases.
//!
//! # Responsibility
//! - Compose local survey/email records with remotely fetched set data.
//! - Own the email-invitation lifecycle (creation, completion, expiry).

pub mod survey_service;
