//! Core domain logic for the survey service.
//!
//! Surveys reference question sets owned by the assessment service; the
//! only coupling point is the `SetFetcher` contract in [`client`].

pub mod client;
pub mod config;
pub mod db;
pub mod model;
pub mod repo;
pub mod service;

pub use client::set_client::{
    AnswerSnapshot, FetchError, HttpSetFetcher, QuestionSnapshot, SetFetcher,
};
pub use config::SurveyConfig;
pub use model::email::{EmailInvitation, InvitationId, InvitationStatus};
pub use model::survey::{SetId, Survey, SurveyDraft, SurveyId};
pub use repo::email_repo::{EmailRepository, SqliteEmailRepository};
pub use repo::survey_repo::{SqliteSurveyRepository, SurveyRepository};
pub use repo::{RepoError, RepoResult};
pub use service::survey_service::{FullResponse, SurveyCreated, SurveyError, SurveyService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
