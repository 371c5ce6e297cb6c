//! Question-set aggregate model.
//!
//! # Responsibility
//! - Define the persisted aggregate (`QuestionSet`) and its input shape
//!   (`AssessmentDraft`).
//! - Provide in-memory mutation helpers used by the aggregate service.
//!
//! # Invariants
//! - `set_name` is unique across all sets (enforced by storage).
//! - Deleting the last question does not delete the set.
//! - Answer lists are replaced wholesale, never patched element-wise.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a question set.
pub type SetId = i64;

/// Stable identifier of a question within the assessment store.
pub type QuestionId = i64;

/// One answer option. Answers carry no identity beyond their position
/// inside the owning question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer option text shown to respondents.
    pub text: String,
    /// Follow-up suggestion attached to this option.
    pub suggestion: String,
}

/// One question owned by a `QuestionSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub description: String,
    /// Ordered answer options; replaced as a whole list.
    pub answers: Vec<Answer>,
}

/// Aggregate root for a named assessment question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub set_id: SetId,
    /// Unique across all sets.
    pub set_name: String,
    pub domain: String,
    /// Ordered question sequence; order is preserved by storage.
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Looks up a question by id inside this set only.
    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    /// Replaces the whole answer list of one question.
    ///
    /// Returns `false` when the question id is not part of this set.
    pub fn replace_answers(&mut self, question_id: QuestionId, answers: Vec<Answer>) -> bool {
        match self
            .questions
            .iter_mut()
            .find(|q| q.question_id == question_id)
        {
            Some(question) => {
                question.answers = answers;
                true
            }
            None => false,
        }
    }

    /// Removes a question from the sequence if present.
    ///
    /// Removing an absent id is a no-op; the caller still persists the set.
    pub fn remove_question(&mut self, question_id: QuestionId) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.question_id != question_id);
        self.questions.len() != before
    }
}

/// Input shape for creating a question inside a new assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub description: String,
    pub answers: Vec<Answer>,
}

/// Input shape for creating an assessment aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub set_name: String,
    pub domain: String,
    pub questions: Vec<QuestionDraft>,
}

impl AssessmentDraft {
    /// Validates the draft before any storage write.
    pub fn validate(&self) -> Result<(), AssessmentValidationError> {
        if self.set_name.trim().is_empty() {
            return Err(AssessmentValidationError::BlankSetName);
        }
        if self.domain.trim().is_empty() {
            return Err(AssessmentValidationError::BlankDomain);
        }
        if self
            .questions
            .iter()
            .any(|q| q.description.trim().is_empty())
        {
            return Err(AssessmentValidationError::BlankQuestion);
        }
        Ok(())
    }
}

/// Validation failure for assessment drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentValidationError {
    BlankSetName,
    BlankDomain,
    BlankQuestion,
}

impl Display for AssessmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSetName => write!(f, "set name must not be blank"),
            Self::BlankDomain => write!(f, "domain must not be blank"),
            Self::BlankQuestion => write!(f, "question description must not be blank"),
        }
    }
}

impl Error for AssessmentValidationError {}

#[cfg(test)]
mod tests {
    use super::{Answer, AssessmentDraft, AssessmentValidationError, Question, QuestionSet};

    fn sample_set() -> QuestionSet {
        QuestionSet {
            set_id: 1,
            set_name: "Cloud Readiness".to_string(),
            domain: "cloud".to_string(),
            questions: vec![
                Question {
                    question_id: 10,
                    description: "Do you use IaC?".to_string(),
                    answers: vec![Answer {
                        text: "Yes".to_string(),
                        suggestion: "Keep going".to_string(),
                    }],
                },
                Question {
                    question_id: 11,
                    description: "Do you run containers?".to_string(),
                    answers: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn replace_answers_targets_one_question_only() {
        let mut set = sample_set();
        let replaced = set.replace_answers(
            10,
            vec![Answer {
                text: "No".to_string(),
                suggestion: "Start with Terraform".to_string(),
            }],
        );

        assert!(replaced);
        assert_eq!(set.question(10).unwrap().answers.len(), 1);
        assert_eq!(set.question(10).unwrap().answers[0].text, "No");
        assert!(set.question(11).unwrap().answers.is_empty());
    }

    #[test]
    fn replace_answers_on_unknown_question_reports_false() {
        let mut set = sample_set();
        assert!(!set.replace_answers(99, Vec::new()));
    }

    #[test]
    fn remove_question_is_noop_for_unknown_id() {
        let mut set = sample_set();
        assert!(!set.remove_question(99));
        assert_eq!(set.questions.len(), 2);

        assert!(set.remove_question(10));
        assert_eq!(set.questions.len(), 1);
    }

    #[test]
    fn question_serializes_to_the_wire_shape() {
        let set = sample_set();
        let json = serde_json::to_value(&set.questions[0]).unwrap();
        assert_eq!(json["question_id"], 10);
        assert_eq!(json["answers"][0]["text"], "Yes");
        assert_eq!(json["answers"][0]["suggestion"], "Keep going");
    }

    #[test]
    fn draft_validation_rejects_blank_fields() {
        let draft = AssessmentDraft {
            set_name: "  ".to_string(),
            domain: "cloud".to_string(),
            questions: Vec::new(),
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            AssessmentValidationError::BlankSetName
        );
    }
}
