//! Core domain logic for the assessment service.
//! This crate is the single source of truth for question-set invariants.

pub mod db;
pub mod model;
pub mod repo;
pub mod service;

pub use model::assessment::{
    Answer, AssessmentDraft, AssessmentValidationError, Question, QuestionDraft, QuestionId,
    QuestionSet, SetId,
};
pub use repo::set_repo::{RepoError, RepoResult, SetRepository, SqliteSetRepository};
pub use service::assessment_service::{AssessmentError, AssessmentService, DeleteReceipt};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
