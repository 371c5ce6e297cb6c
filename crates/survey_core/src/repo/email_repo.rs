//! Email-invitation store contract and SQLite implementation.
//!
//! # Invariants
//! - `add_batch` persists all supplied addresses in one transaction or none.
//! - Status mutations are constrained to `status = 'pending'` rows, so a
//!   terminal status can never be overwritten.

use crate::model::email::{EmailInvitation, InvitationId, InvitationStatus};
use crate::model::survey::SurveyId;
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

/// Keyed store for email invitations, queryable by owning survey.
pub trait EmailRepository {
    /// Creates one `Pending` invitation per address, atomically as a set.
    ///
    /// Input order is preserved and duplicates are not deduplicated; each
    /// address produces its own invitation.
    fn add_batch(
        &self,
        survey_id: SurveyId,
        addresses: &[String],
    ) -> RepoResult<Vec<EmailInvitation>>;
    /// Lists all invitations of one survey in insertion order.
    fn list_by_survey(&self, survey_id: SurveyId) -> RepoResult<Vec<EmailInvitation>>;
    /// Moves one `Pending` invitation to `Completed`.
    fn mark_completed(&self, email_id: InvitationId) -> RepoResult<EmailInvitation>;
    /// Moves all `Pending` invitations of one survey to `Expired`.
    ///
    /// Returns the number of rows changed; already terminal rows are left
    /// untouched, which makes the sweep idempotent.
    fn expire_pending(&self, survey_id: SurveyId) -> RepoResult<u32>;
}

/// SQLite-backed email-invitation store.
pub struct SqliteEmailRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmailRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find(&self, email_id: InvitationId) -> RepoResult<Option<EmailInvitation>> {
        let mut stmt = self.conn.prepare(
            "SELECT email_id, survey_id, address, status
             FROM emails
             WHERE email_id = ?1;",
        )?;
        let mut rows = stmt.query([email_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_email_row(row)?));
        }
        Ok(None)
    }
}

impl EmailRepository for SqliteEmailRepository<'_> {
    fn add_batch(
        &self,
        survey_id: SurveyId,
        addresses: &[String],
    ) -> RepoResult<Vec<EmailInvitation>> {
        let tx = self.conn.unchecked_transaction()?;

        let mut invitations = Vec::with_capacity(addresses.len());
        for address in addresses {
            tx.execute(
                "INSERT INTO emails (survey_id, address, status) VALUES (?1, ?2, 'pending');",
                params![survey_id, address],
            )?;
            invitations.push(EmailInvitation {
                email_id: tx.last_insert_rowid(),
                survey_id,
                address: address.clone(),
                status: InvitationStatus::Pending,
            });
        }

        tx.commit()?;
        info!(
            "event=email_batch_add module=email_repo status=ok survey_id={survey_id} count={}",
            invitations.len()
        );
        Ok(invitations)
    }

    fn list_by_survey(&self, survey_id: SurveyId) -> RepoResult<Vec<EmailInvitation>> {
        let mut stmt = self.conn.prepare(
            "SELECT email_id, survey_id, address, status
             FROM emails
             WHERE survey_id = ?1
             ORDER BY email_id ASC;",
        )?;
        let mut rows = stmt.query([survey_id])?;
        let mut invitations = Vec::new();
        while let Some(row) = rows.next()? {
            invitations.push(parse_email_row(row)?);
        }
        Ok(invitations)
    }

    fn mark_completed(&self, email_id: InvitationId) -> RepoResult<EmailInvitation> {
        let current = self
            .find(email_id)?
            .ok_or(RepoError::NotFound(email_id))?;

        if !current.status.can_transition_to(InvitationStatus::Completed) {
            return Err(RepoError::InvalidTransition {
                email_id,
                from: current.status,
            });
        }

        self.conn.execute(
            "UPDATE emails SET status = 'completed'
             WHERE email_id = ?1 AND status = 'pending';",
            [email_id],
        )?;

        Ok(EmailInvitation {
            status: InvitationStatus::Completed,
            ..current
        })
    }

    fn expire_pending(&self, survey_id: SurveyId) -> RepoResult<u32> {
        let changed = self.conn.execute(
            "UPDATE emails SET status = 'expired'
             WHERE survey_id = ?1 AND status = 'pending';",
            [survey_id],
        )?;
        Ok(changed as u32)
    }
}

fn parse_email_row(row: &Row<'_>) -> RepoResult<EmailInvitation> {
    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in emails.status"))
    })?;

    Ok(EmailInvitation {
        email_id: row.get("email_id")?,
        survey_id: row.get("survey_id")?,
        address: row.get("address")?,
        status,
    })
}

fn parse_status(value: &str) -> Option<InvitationStatus> {
    match value {
        "pending" => Some(InvitationStatus::Pending),
        "completed" => Some(InvitationStatus::Completed),
        "expired" => Some(InvitationStatus::Expired),
        _ => None,
    }
}
