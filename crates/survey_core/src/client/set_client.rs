//! Question-set fetch contract and HTTP implementation.
//!
//! # Responsibility
//! - Retrieve a set's question/answer snapshot from the assessment service.
//! - Map HTTP outcomes onto the fetch error taxonomy (404 is absence,
//!   everything else is unavailability).

use crate::model::survey::SetId;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const FETCH_TIMEOUT_SECS: u64 = 10;

/// One answer option as served by the assessment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSnapshot {
    pub text: String,
    pub suggestion: String,
}

/// Point-in-time read of one question in a remote set.
///
/// Snapshots are never persisted; they are merged into responses at query
/// time so every read reflects the assessment service's current data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSnapshot {
    pub question_id: i64,
    pub description: String,
    pub answers: Vec<AnswerSnapshot>,
}

/// Failure modes of a remote set fetch.
#[derive(Debug)]
pub enum FetchError {
    /// The remote side reports the set does not exist.
    SetMissing(SetId),
    /// Transport failure, timeout, or an unexpected remote response.
    Unavailable(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetMissing(set_id) => write!(f, "set {set_id} not found"),
            Self::Unavailable(detail) => write!(f, "assessment service unavailable: {detail}"),
        }
    }
}

impl Error for FetchError {}

/// Capability contract for fetching a question set by id.
///
/// This is the only point where the survey service depends on assessment
/// data; tests substitute it with a stub.
pub trait SetFetcher {
    fn fetch_set(&self, set_id: SetId) -> Result<Vec<QuestionSnapshot>, FetchError>;
}

/// Blocking HTTP fetcher against the assessment service.
pub struct HttpSetFetcher {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSetFetcher {
    /// Builds a fetcher for the given assessment service base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|err| FetchError::Unavailable(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl SetFetcher for HttpSetFetcher {
    fn fetch_set(&self, set_id: SetId) -> Result<Vec<QuestionSnapshot>, FetchError> {
        let url = format!("{}/assessments/{set_id}/questions", self.base_url);

        let response = self.client.get(&url).send().map_err(|err| {
            error!("event=set_fetch module=set_client status=error set_id={set_id} error={err}");
            FetchError::Unavailable(err.to_string())
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            info!("event=set_fetch module=set_client status=missing set_id={set_id}");
            return Err(FetchError::SetMissing(set_id));
        }
        if !status.is_success() {
            error!(
                "event=set_fetch module=set_client status=error set_id={set_id} http_status={}",
                status.as_u16()
            );
            return Err(FetchError::Unavailable(format!(
                "unexpected HTTP status {status} from {url}"
            )));
        }

        let questions: Vec<QuestionSnapshot> = response
            .json()
            .map_err(|err| FetchError::Unavailable(format!("invalid snapshot payload: {err}")))?;

        info!(
            "event=set_fetch module=set_client status=ok set_id={set_id} questions={}",
            questions.len()
        );
        Ok(questions)
    }
}
