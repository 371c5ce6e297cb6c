//! Survey orchestration service.
//!
//! # Responsibility
//! - Create surveys after validating the target set exists remotely.
//! - Build consolidated responses from local records plus a fresh remote
//!   snapshot on every read.
//! - Manage invitation creation, completion bookkeeping, and expiry.
//!
//! # Invariants
//! - `add_survey` fetches before it writes; a survey for a nonexistent set
//!   is never persisted.
//! - `get_survey_by_id` checks local existence first and makes no remote
//!   call for an unknown survey.
//! - Email operations normalize EVERY lookup failure, including
//!   infrastructure errors, to `SetNotFound`; callers never see storage
//!   error kinds.

use crate::client::set_client::{FetchError, QuestionSnapshot, SetFetcher};
use crate::model::email::{EmailInvitation, InvitationId};
use crate::model::survey::{Survey, SurveyDraft, SurveyId};
use crate::repo::email_repo::EmailRepository;
use crate::repo::survey_repo::SurveyRepository;
use crate::repo::RepoError;
use chrono::{Days, NaiveDate, Utc};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for survey use-cases.
#[derive(Debug)]
pub enum SurveyError {
    /// Catch-all for absent records and any survey-side lookup failure.
    SetNotFound(String),
    /// Transport-level failure while creating a survey.
    RemoteUnavailable(String),
    /// Invitation status change from a terminal state.
    InvalidTransition(String),
}

impl Display for SurveyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetNotFound(message) => write!(f, "{message}"),
            Self::RemoteUnavailable(detail) => write!(f, "{detail}"),
            Self::InvalidTransition(message) => write!(f, "{message}"),
        }
    }
}

impl Error for SurveyError {}

/// Response envelope for survey creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyCreated {
    pub survey_id: SurveyId,
    pub set_id: i64,
    pub requestor: String,
    pub company_name: String,
    pub created_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Snapshot fetched during validation, returned as-is.
    pub set_data: Vec<QuestionSnapshot>,
}

/// Consolidated survey view: local record, local invitations, and a fresh
/// remote snapshot. Never persisted; rebuilt on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullResponse {
    pub survey_id: SurveyId,
    pub set_id: i64,
    pub requestor: String,
    pub company_name: String,
    pub created_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub set_data: Vec<QuestionSnapshot>,
    pub emails: Vec<EmailInvitation>,
}

/// Orchestration service over the survey store, email store, and the
/// remote set fetcher.
pub struct SurveyService<S, E, F>
where
    S: SurveyRepository,
    E: EmailRepository,
    F: SetFetcher,
{
    surveys: S,
    emails: E,
    fetcher: F,
    expiry_days: u32,
}

impl<S, E, F> SurveyService<S, E, F>
where
    S: SurveyRepository,
    E: EmailRepository,
    F: SetFetcher,
{
    /// Creates a service with an externally supplied expiry window.
    pub fn new(surveys: S, emails: E, fetcher: F, expiry_days: u32) -> Self {
        Self {
            surveys,
            emails,
            fetcher,
            expiry_days,
        }
    }

    /// Creates a survey for an existing question set.
    ///
    /// The remote set is fetched first; when the remote side reports the
    /// set missing, nothing is persisted and the call fails with
    /// `SetNotFound`. Transport failures surface distinctly as
    /// `RemoteUnavailable`.
    pub fn add_survey(&self, draft: &SurveyDraft) -> Result<SurveyCreated, SurveyError> {
        let set_data = self.fetcher.fetch_set(draft.set_id).map_err(|err| match err {
            FetchError::SetMissing(_) => SurveyError::SetNotFound(err.to_string()),
            FetchError::Unavailable(detail) => SurveyError::RemoteUnavailable(detail),
        })?;

        let created_date = Utc::now().date_naive();
        let expiry_date = created_date
            .checked_add_days(Days::new(u64::from(self.expiry_days)))
            .ok_or_else(|| SurveyError::SetNotFound("expiry window out of range".to_string()))?;

        let survey = self
            .surveys
            .insert_survey(draft, created_date, expiry_date)
            .map_err(lookup_failure)?;

        info!(
            "event=survey_create module=survey_service status=ok survey_id={} set_id={} expiry_date={}",
            survey.survey_id, survey.set_id, survey.expiry_date
        );

        Ok(SurveyCreated {
            survey_id: survey.survey_id,
            set_id: survey.set_id,
            requestor: survey.requestor,
            company_name: survey.company_name,
            created_date: survey.created_date,
            expiry_date: survey.expiry_date,
            set_data,
        })
    }

    /// Lists every survey merged with its freshly fetched set data.
    ///
    /// Any fetch failure fails the whole listing; there are no partial
    /// results.
    pub fn get_surveys(&self) -> Result<Vec<FullResponse>, SurveyError> {
        let surveys = self.surveys.list_surveys().map_err(lookup_failure)?;

        let mut responses = Vec::with_capacity(surveys.len());
        for survey in surveys {
            responses.push(self.consolidate(survey)?);
        }
        Ok(responses)
    }

    /// Loads one consolidated survey view.
    ///
    /// Existence is checked locally first; no remote call is attempted for
    /// an unknown survey id.
    pub fn get_survey_by_id(&self, survey_id: SurveyId) -> Result<FullResponse, SurveyError> {
        let survey = self
            .surveys
            .find_by_survey_id(survey_id)
            .map_err(lookup_failure)?
            .ok_or_else(|| SurveyError::SetNotFound("Invalid surveyId".to_string()))?;

        self.consolidate(survey)
    }

    /// Invites the given addresses to a survey.
    ///
    /// One `Pending` invitation per address, in input order, persisted as
    /// an atomic batch. Duplicate addresses each produce their own
    /// invitation.
    pub fn add_emails(
        &self,
        survey_id: SurveyId,
        addresses: &[String],
    ) -> Result<Vec<EmailInvitation>, SurveyError> {
        self.surveys
            .find_by_survey_id(survey_id)
            .map_err(lookup_failure)?
            .ok_or_else(|| SurveyError::SetNotFound("Invalid surveyId".to_string()))?;

        self.emails
            .add_batch(survey_id, addresses)
            .map_err(lookup_failure)
    }

    /// Lists a survey's invitations.
    pub fn get_emails(&self, survey_id: SurveyId) -> Result<Vec<EmailInvitation>, SurveyError> {
        self.surveys
            .find_by_survey_id(survey_id)
            .map_err(lookup_failure)?
            .ok_or_else(|| SurveyError::SetNotFound("Invalid surveyId".to_string()))?;

        self.emails.list_by_survey(survey_id).map_err(lookup_failure)
    }

    /// Marks one invitation completed.
    pub fn complete_invitation(
        &self,
        email_id: InvitationId,
    ) -> Result<EmailInvitation, SurveyError> {
        match self.emails.mark_completed(email_id) {
            Ok(invitation) => Ok(invitation),
            Err(RepoError::InvalidTransition { .. }) => Err(SurveyError::InvalidTransition(
                format!("invitation {email_id} is no longer pending"),
            )),
            Err(err) => Err(lookup_failure(err)),
        }
    }

    /// Expires pending invitations of every survey whose expiry window has
    /// passed as of `today`. Idempotent; terminal statuses are untouched.
    pub fn expire_overdue(&self, today: NaiveDate) -> Result<u32, SurveyError> {
        let surveys = self.surveys.list_surveys().map_err(lookup_failure)?;

        let mut expired = 0;
        for survey in surveys {
            if survey.is_expired(today) {
                expired += self
                    .emails
                    .expire_pending(survey.survey_id)
                    .map_err(lookup_failure)?;
            }
        }

        info!(
            "event=invitations_expire module=survey_service status=ok as_of={today} count={expired}"
        );
        Ok(expired)
    }

    fn consolidate(&self, survey: Survey) -> Result<FullResponse, SurveyError> {
        // Always a fresh fetch; consolidated views are never served from a
        // cache.
        let set_data = self
            .fetcher
            .fetch_set(survey.set_id)
            .map_err(|err| SurveyError::SetNotFound(err.to_string()))?;
        let emails = self
            .emails
            .list_by_survey(survey.survey_id)
            .map_err(lookup_failure)?;

        Ok(FullResponse {
            survey_id: survey.survey_id,
            set_id: survey.set_id,
            requestor: survey.requestor,
            company_name: survey.company_name,
            created_date: survey.created_date,
            expiry_date: survey.expiry_date,
            set_data,
            emails,
        })
    }
}

/// Normalizes any survey-side lookup failure to `SetNotFound` so callers
/// never see internal storage error kinds.
fn lookup_failure(err: RepoError) -> SurveyError {
    SurveyError::SetNotFound(err.to_string())
}
