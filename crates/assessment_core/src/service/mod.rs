//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into aggregate-level operations.
//! - Keep edge layers (HTTP controllers) decoupled from storage details.

pub mod assessment_service;
