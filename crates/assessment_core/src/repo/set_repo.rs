//! Question-set repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load the set -> questions -> answers aggregate as one unit.
//! - Surface `set_name` uniqueness violations as semantic conflicts.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - `save_set` rewrites the whole aggregate inside one immediate
//!   transaction, so the question list and the question records cannot
//!   disagree and writes are serialized per aggregate.

use crate::db::DbError;
use crate::model::assessment::{
    Answer, AssessmentDraft, AssessmentValidationError, Question, QuestionId, QuestionSet, SetId,
};
use log::info;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for question-set persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(AssessmentValidationError),
    Db(DbError),
    /// `set_name` uniqueness violation.
    Conflict,
    SetNotFound(SetId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict => write!(f, "set name already in use"),
            Self::SetNotFound(id) => write!(f, "set not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Conflict | Self::SetNotFound(_) => None,
        }
    }
}

impl From<AssessmentValidationError> for RepoError {
    fn from(value: AssessmentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if is_unique_violation(&value) {
            Self::Conflict
        } else {
            Self::Db(DbError::Sqlite(value))
        }
    }
}

/// Keyed-store contract for question-set aggregates.
pub trait SetRepository {
    /// Creates one aggregate from a draft and returns it with assigned ids.
    fn create_set(&mut self, draft: &AssessmentDraft) -> RepoResult<QuestionSet>;
    /// Loads one aggregate by id.
    fn get_set(&self, set_id: SetId) -> RepoResult<Option<QuestionSet>>;
    /// Loads one aggregate by exact set name.
    fn get_set_by_name(&self, set_name: &str) -> RepoResult<Option<QuestionSet>>;
    /// Lists all aggregates ordered by id.
    fn list_sets(&self) -> RepoResult<Vec<QuestionSet>>;
    /// Persists the whole aggregate, replacing its question/answer rows.
    fn save_set(&mut self, set: &QuestionSet) -> RepoResult<()>;
    /// Loads one question record regardless of owning set.
    fn get_question(&self, question_id: QuestionId) -> RepoResult<Option<Question>>;
}

/// SQLite-backed question-set repository.
pub struct SqliteSetRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSetRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl SetRepository for SqliteSetRepository<'_> {
    fn create_set(&mut self, draft: &AssessmentDraft) -> RepoResult<QuestionSet> {
        draft.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO sets (set_name, domain) VALUES (?1, ?2);",
            params![draft.set_name, draft.domain],
        )?;
        let set_id = tx.last_insert_rowid();

        let mut questions = Vec::with_capacity(draft.questions.len());
        for (position, question) in draft.questions.iter().enumerate() {
            tx.execute(
                "INSERT INTO questions (set_id, position, description) VALUES (?1, ?2, ?3);",
                params![set_id, position as i64, question.description],
            )?;
            let question_id = tx.last_insert_rowid();
            insert_answers(&tx, question_id, &question.answers)?;
            questions.push(Question {
                question_id,
                description: question.description.clone(),
                answers: question.answers.clone(),
            });
        }

        tx.commit()?;
        info!(
            "event=set_create module=set_repo status=ok set_id={} questions={}",
            set_id,
            questions.len()
        );

        Ok(QuestionSet {
            set_id,
            set_name: draft.set_name.clone(),
            domain: draft.domain.clone(),
            questions,
        })
    }

    fn get_set(&self, set_id: SetId) -> RepoResult<Option<QuestionSet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT set_id, set_name, domain FROM sets WHERE set_id = ?1;")?;
        let mut rows = stmt.query([set_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(load_set_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn get_set_by_name(&self, set_name: &str) -> RepoResult<Option<QuestionSet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT set_id, set_name, domain FROM sets WHERE set_name = ?1;")?;
        let mut rows = stmt.query([set_name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(load_set_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn list_sets(&self) -> RepoResult<Vec<QuestionSet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT set_id, set_name, domain FROM sets ORDER BY set_id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut sets = Vec::new();
        while let Some(row) = rows.next()? {
            sets.push(load_set_row(self.conn, row)?);
        }
        Ok(sets)
    }

    fn save_set(&mut self, set: &QuestionSet) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE sets SET set_name = ?2, domain = ?3 WHERE set_id = ?1;",
            params![set.set_id, set.set_name, set.domain],
        )?;
        if changed == 0 {
            return Err(RepoError::SetNotFound(set.set_id));
        }

        // Rewrite the child collections wholesale; answers cascade with
        // their question rows.
        tx.execute("DELETE FROM questions WHERE set_id = ?1;", [set.set_id])?;
        for (position, question) in set.questions.iter().enumerate() {
            tx.execute(
                "INSERT INTO questions (question_id, set_id, position, description)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    question.question_id,
                    set.set_id,
                    position as i64,
                    question.description
                ],
            )?;
            insert_answers(&tx, question.question_id, &question.answers)?;
        }

        tx.commit()?;
        info!(
            "event=set_save module=set_repo status=ok set_id={} questions={}",
            set.set_id,
            set.questions.len()
        );
        Ok(())
    }

    fn get_question(&self, question_id: QuestionId) -> RepoResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare("SELECT question_id, description FROM questions WHERE question_id = ?1;")?;
        let mut rows = stmt.query([question_id])?;
        if let Some(row) = rows.next()? {
            let question_id: QuestionId = row.get("question_id")?;
            let description: String = row.get("description")?;
            let answers = load_answers(self.conn, question_id)?;
            return Ok(Some(Question {
                question_id,
                description,
                answers,
            }));
        }
        Ok(None)
    }
}

fn load_set_row(conn: &Connection, row: &rusqlite::Row<'_>) -> RepoResult<QuestionSet> {
    let set_id: SetId = row.get("set_id")?;
    Ok(QuestionSet {
        set_id,
        set_name: row.get("set_name")?,
        domain: row.get("domain")?,
        questions: load_questions(conn, set_id)?,
    })
}

fn load_questions(conn: &Connection, set_id: SetId) -> RepoResult<Vec<Question>> {
    let mut stmt = conn.prepare(
        "SELECT question_id, description
         FROM questions
         WHERE set_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([set_id])?;
    let mut questions = Vec::new();
    while let Some(row) = rows.next()? {
        let question_id: QuestionId = row.get("question_id")?;
        let description: String = row.get("description")?;
        let answers = load_answers(conn, question_id)?;
        questions.push(Question {
            question_id,
            description,
            answers,
        });
    }
    Ok(questions)
}

fn load_answers(conn: &Connection, question_id: QuestionId) -> RepoResult<Vec<Answer>> {
    let mut stmt = conn.prepare(
        "SELECT answer, suggestion
         FROM answers
         WHERE question_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([question_id])?;
    let mut answers = Vec::new();
    while let Some(row) = rows.next()? {
        answers.push(Answer {
            text: row.get("answer")?,
            suggestion: row.get("suggestion")?,
        });
    }
    Ok(answers)
}

fn insert_answers(tx: &Transaction<'_>, question_id: i64, answers: &[Answer]) -> RepoResult<()> {
    for (position, answer) in answers.iter().enumerate() {
        tx.execute(
            "INSERT INTO answers (question_id, position, answer, suggestion)
             VALUES (?1, ?2, ?3, ?4);",
            params![question_id, position as i64, answer.text, answer.suggestion],
        )?;
    }
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
