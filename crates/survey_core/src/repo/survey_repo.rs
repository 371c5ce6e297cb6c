//! Survey record store contract and SQLite implementation.

use crate::model::survey::{Survey, SurveyDraft, SurveyId};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

/// Keyed store for survey records.
pub trait SurveyRepository {
    /// Persists one survey with the given creation/expiry dates.
    fn insert_survey(
        &self,
        draft: &SurveyDraft,
        created_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> RepoResult<Survey>;
    /// Lists all surveys ordered by id.
    fn list_surveys(&self) -> RepoResult<Vec<Survey>>;
    /// Loads one survey by id.
    fn find_by_survey_id(&self, survey_id: SurveyId) -> RepoResult<Option<Survey>>;
}

/// SQLite-backed survey store.
pub struct SqliteSurveyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSurveyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SurveyRepository for SqliteSurveyRepository<'_> {
    fn insert_survey(
        &self,
        draft: &SurveyDraft,
        created_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> RepoResult<Survey> {
        self.conn.execute(
            "INSERT INTO surveys (set_id, requestor, company_name, created_date, expiry_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.set_id,
                draft.requestor,
                draft.company_name,
                created_date.to_string(),
                expiry_date.to_string(),
            ],
        )?;

        Ok(Survey {
            survey_id: self.conn.last_insert_rowid(),
            set_id: draft.set_id,
            requestor: draft.requestor.clone(),
            company_name: draft.company_name.clone(),
            created_date,
            expiry_date,
        })
    }

    fn list_surveys(&self) -> RepoResult<Vec<Survey>> {
        let mut stmt = self.conn.prepare(
            "SELECT survey_id, set_id, requestor, company_name, created_date, expiry_date
             FROM surveys
             ORDER BY survey_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut surveys = Vec::new();
        while let Some(row) = rows.next()? {
            surveys.push(parse_survey_row(row)?);
        }
        Ok(surveys)
    }

    fn find_by_survey_id(&self, survey_id: SurveyId) -> RepoResult<Option<Survey>> {
        let mut stmt = self.conn.prepare(
            "SELECT survey_id, set_id, requestor, company_name, created_date, expiry_date
             FROM surveys
             WHERE survey_id = ?1;",
        )?;
        let mut rows = stmt.query([survey_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_survey_row(row)?));
        }
        Ok(None)
    }
}

fn parse_survey_row(row: &Row<'_>) -> RepoResult<Survey> {
    Ok(Survey {
        survey_id: row.get("survey_id")?,
        set_id: row.get("set_id")?,
        requestor: row.get("requestor")?,
        company_name: row.get("company_name")?,
        created_date: parse_date(&row.get::<_, String>("created_date")?, "surveys.created_date")?,
        expiry_date: parse_date(&row.get::<_, String>("expiry_date")?, "surveys.expiry_date")?,
    })
}

fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}
