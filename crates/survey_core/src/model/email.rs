//! Email invitation model and status state machine.

use crate::model::survey::SurveyId;
use serde::{Deserialize, Serialize};

/// Stable identifier of an email invitation.
pub type InvitationId = i64;

/// Participation status of one invited respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Created, awaiting respondent action.
    Pending,
    /// Respondent finished the survey.
    Completed,
    /// The owning survey's expiry window passed before completion.
    Expired,
}

impl InvitationStatus {
    /// Whether a transition to `next` is allowed.
    ///
    /// Only `Pending` moves anywhere; `Expired` and `Completed` are
    /// terminal, so an expired invitation can never revert to pending.
    pub fn can_transition_to(self, next: InvitationStatus) -> bool {
        matches!(
            (self, next),
            (
                InvitationStatus::Pending,
                InvitationStatus::Completed | InvitationStatus::Expired
            )
        )
    }
}

/// One respondent's invitation to a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailInvitation {
    pub email_id: InvitationId,
    pub survey_id: SurveyId,
    pub address: String,
    pub status: InvitationStatus,
}

#[cfg(test)]
mod tests {
    use super::InvitationStatus;

    #[test]
    fn only_pending_invitations_may_transition() {
        assert!(InvitationStatus::Pending.can_transition_to(InvitationStatus::Completed));
        assert!(InvitationStatus::Pending.can_transition_to(InvitationStatus::Expired));

        assert!(!InvitationStatus::Expired.can_transition_to(InvitationStatus::Pending));
        assert!(!InvitationStatus::Expired.can_transition_to(InvitationStatus::Completed));
        assert!(!InvitationStatus::Completed.can_transition_to(InvitationStatus::Expired));
        assert!(!InvitationStatus::Pending.can_transition_to(InvitationStatus::Pending));
    }
}
