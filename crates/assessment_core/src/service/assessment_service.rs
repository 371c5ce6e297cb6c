//! Assessment aggregate service.
//!
//! # Responsibility
//! - Enforce aggregate invariants when mutating a question's answer list or
//!   removing a question from a set.
//! - Resolve the owning set before touching any question.
//!
//! # Invariants
//! - Question lookup is always scoped to one set; there is no global
//!   cross-set question uniqueness assumption.
//! - Mutations load the aggregate, change it in memory, and persist it
//!   wholesale; child records are never written independently.

use crate::model::assessment::{
    Answer, AssessmentDraft, Question, QuestionId, QuestionSet, SetId,
};
use crate::repo::set_repo::{RepoError, SetRepository};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed user-facing message for set-name uniqueness violations.
pub const SET_EXISTS_MESSAGE: &str = "set already exists";

/// Service error for assessment use-cases.
///
/// `NotFound` carries the message the edge layer returns verbatim;
/// `Conflict` always renders the fixed "set already exists" message.
#[derive(Debug)]
pub enum AssessmentError {
    NotFound(String),
    Conflict,
    Repo(RepoError),
}

impl Display for AssessmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Conflict => write!(f, "{SET_EXISTS_MESSAGE}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssessmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AssessmentError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Conflict => Self::Conflict,
            other => Self::Repo(other),
        }
    }
}

/// Confirmation envelope returned by question deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReceipt {
    pub message: String,
}

/// Aggregate mutation and lookup service over a question-set store.
pub struct AssessmentService<R: SetRepository> {
    repo: R,
}

impl<R: SetRepository> AssessmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new assessment aggregate from a draft.
    ///
    /// Duplicate set names fail with `Conflict`.
    pub fn create_assessment(
        &mut self,
        draft: &AssessmentDraft,
    ) -> Result<QuestionSet, AssessmentError> {
        let set = self.repo.create_set(draft)?;
        info!(
            "event=assessment_create module=assessment_service status=ok set_id={}",
            set.set_id
        );
        Ok(set)
    }

    /// Replaces the whole answer list of one question inside a set.
    ///
    /// The owning set is resolved first; an absent set fails with the
    /// original "Set name is invalid" message. An empty `answers` list is
    /// permitted and clears the question's answers. The set is persisted
    /// as one unit so question and answers commit atomically.
    pub fn replace_answers(
        &mut self,
        set_id: SetId,
        question_id: QuestionId,
        answers: Vec<Answer>,
    ) -> Result<&'static str, AssessmentError> {
        let mut set = self
            .repo
            .get_set(set_id)?
            .ok_or_else(|| AssessmentError::NotFound("Set name is invalid".to_string()))?;

        if !set.replace_answers(question_id, answers) {
            return Err(AssessmentError::NotFound(
                "Question id is invalid".to_string(),
            ));
        }

        self.repo.save_set(&set)?;
        info!(
            "event=answers_replace module=assessment_service status=ok set_id={set_id} question_id={question_id}"
        );
        Ok("Question updated successfully")
    }

    /// Removes one question from a set's sequence.
    ///
    /// Removing an id that is not part of the set is a no-op that still
    /// succeeds; the set record itself must exist. The question-record
    /// deletion and the updated set commit in the same transaction.
    pub fn delete_question(
        &mut self,
        set_id: SetId,
        question_id: QuestionId,
    ) -> Result<DeleteReceipt, AssessmentError> {
        let mut set = self
            .repo
            .get_set(set_id)?
            .ok_or_else(|| AssessmentError::NotFound("Set name is invalid".to_string()))?;

        let removed = set.remove_question(question_id);
        self.repo.save_set(&set)?;
        info!(
            "event=question_delete module=assessment_service status=ok set_id={set_id} question_id={question_id} removed={removed}"
        );

        Ok(DeleteReceipt {
            message: "Question deleted successfully".to_string(),
        })
    }

    /// Lists the question sequence of the set with this exact name.
    pub fn questions_by_set_name(
        &self,
        set_name: &str,
    ) -> Result<Vec<Question>, AssessmentError> {
        let set = self
            .repo
            .get_set_by_name(set_name)?
            .ok_or_else(|| AssessmentError::NotFound("set name is invalid".to_string()))?;
        Ok(set.questions)
    }

    /// Lists the question sequence of the set with this id.
    pub fn questions_by_set_id(&self, set_id: SetId) -> Result<Vec<Question>, AssessmentError> {
        let set = self
            .repo
            .get_set(set_id)?
            .ok_or_else(|| AssessmentError::NotFound("set id is invalid".to_string()))?;
        Ok(set.questions)
    }

    /// Lists every stored assessment aggregate.
    pub fn all_assessments(&self) -> Result<Vec<QuestionSet>, AssessmentError> {
        Ok(self.repo.list_sets()?)
    }

    /// Loads one question record by id, regardless of its owning set.
    pub fn fetch_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<Question>, AssessmentError> {
        Ok(self.repo.get_question(question_id)?)
    }
}
