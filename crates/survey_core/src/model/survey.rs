//! Survey record model.
//!
//! # Invariants
//! - `expiry_date = created_date + expiry_days`; both are fixed at creation.
//! - A survey is immutable after creation except through email-lifecycle
//!   side effects on its invitations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a survey.
pub type SurveyId = i64;

/// Identifier of a question set owned by the assessment service.
///
/// This is a non-owning foreign reference, validated to exist at survey
/// creation time and never re-validated implicitly afterwards.
pub type SetId = i64;

/// Persisted survey record binding a requestor/company to one question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: SurveyId,
    pub set_id: SetId,
    pub requestor: String,
    pub company_name: String,
    pub created_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl Survey {
    /// Whether the survey's expiry window has passed as of `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

/// Input shape for creating a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub requestor: String,
    pub company_name: String,
    pub set_id: SetId,
}
