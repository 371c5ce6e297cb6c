//! End-to-end smoke probe over both core crates.
//!
//! # Responsibility
//! - Wire the assessment store to the survey service through an in-process
//!   fetcher implementing the same contract as the HTTP fetcher.
//! - Keep output deterministic for quick local sanity checks.

mod logging;

use assessment_core::{
    Answer, AssessmentDraft, AssessmentError, AssessmentService, QuestionDraft, SetRepository,
    SqliteSetRepository,
};
use chrono::Utc;
use log::info;
use std::error::Error;
use survey_core::{
    AnswerSnapshot, FetchError, QuestionSnapshot, SetFetcher, SqliteEmailRepository,
    SqliteSurveyRepository, SurveyConfig, SurveyDraft, SurveyService,
};

/// Fetcher backed directly by a local assessment service, used instead of
/// the HTTP fetcher when both stores run in one process.
struct InProcessFetcher<'a, R: SetRepository> {
    assessments: &'a AssessmentService<R>,
}

impl<R: SetRepository> SetFetcher for InProcessFetcher<'_, R> {
    fn fetch_set(&self, set_id: i64) -> Result<Vec<QuestionSnapshot>, FetchError> {
        match self.assessments.questions_by_set_id(set_id) {
            Ok(questions) => Ok(questions.into_iter().map(snapshot_of).collect()),
            Err(AssessmentError::NotFound(_)) => Err(FetchError::SetMissing(set_id)),
            Err(err) => Err(FetchError::Unavailable(err.to_string())),
        }
    }
}

fn snapshot_of(question: assessment_core::Question) -> QuestionSnapshot {
    QuestionSnapshot {
        question_id: question.question_id,
        description: question.description,
        answers: question
            .answers
            .into_iter()
            .map(|Answer { text, suggestion }| AnswerSnapshot { text, suggestion })
            .collect(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("surveydesk-logs");
    logging::init_logging("info", &log_dir)?;

    let config = SurveyConfig::from_env()?;
    info!(
        "event=cli_start module=surveydesk_cli status=ok expiry_days={} assessment_core={} survey_core={}",
        config.expiry_days,
        assessment_core::core_version(),
        survey_core::core_version()
    );

    let mut assessment_conn = assessment_core::db::open_db_in_memory()?;
    let survey_conn = survey_core::db::open_db_in_memory()?;

    let mut assessments = AssessmentService::new(SqliteSetRepository::new(&mut assessment_conn));
    let set = assessments.create_assessment(&AssessmentDraft {
        set_name: "Cloud Readiness".to_string(),
        domain: "cloud".to_string(),
        questions: vec![QuestionDraft {
            description: "Do you use infrastructure as code?".to_string(),
            answers: vec![Answer {
                text: "Yes".to_string(),
                suggestion: "Keep going".to_string(),
            }],
        }],
    })?;
    println!(
        "set id={} name={} questions={}",
        set.set_id,
        set.set_name,
        set.questions.len()
    );

    let surveys = SurveyService::new(
        SqliteSurveyRepository::new(&survey_conn),
        SqliteEmailRepository::new(&survey_conn),
        InProcessFetcher {
            assessments: &assessments,
        },
        config.expiry_days,
    );

    let created = surveys.add_survey(&SurveyDraft {
        requestor: "requestor".to_string(),
        company_name: "Acme".to_string(),
        set_id: set.set_id,
    })?;
    println!(
        "survey id={} set_id={} window_days={}",
        created.survey_id,
        created.set_id,
        (created.expiry_date - created.created_date).num_days()
    );

    let invitations = surveys.add_emails(
        created.survey_id,
        &["a@example.com".to_string(), "b@example.com".to_string()],
    )?;
    println!("invitations={}", invitations.len());

    let response = surveys.get_survey_by_id(created.survey_id)?;
    println!(
        "consolidated survey_id={} questions={} emails={}",
        response.survey_id,
        response.set_data.len(),
        response.emails.len()
    );

    let expired = surveys.expire_overdue(Utc::now().date_naive())?;
    println!("expired_now={expired}");

    Ok(())
}
