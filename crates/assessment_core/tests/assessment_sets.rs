use assessment_core::db::open_db_in_memory;
use assessment_core::{
    Answer, AssessmentDraft, AssessmentError, AssessmentService, QuestionDraft,
    SqliteSetRepository,
};

fn draft(set_name: &str) -> AssessmentDraft {
    AssessmentDraft {
        set_name: set_name.to_string(),
        domain: "cloud".to_string(),
        questions: vec![
            QuestionDraft {
                description: "Do you use infrastructure as code?".to_string(),
                answers: vec![
                    Answer {
                        text: "Yes".to_string(),
                        suggestion: "Keep pipelines reproducible".to_string(),
                    },
                    Answer {
                        text: "No".to_string(),
                        suggestion: "Start with a small Terraform module".to_string(),
                    },
                ],
            },
            QuestionDraft {
                description: "Do you run workloads in containers?".to_string(),
                answers: vec![Answer {
                    text: "Partially".to_string(),
                    suggestion: "Audit remaining VM workloads".to_string(),
                }],
            },
        ],
    }
}

#[test]
fn create_assessment_persists_whole_aggregate() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();

    assert_eq!(created.set_name, "Cloud Readiness");
    assert_eq!(created.domain, "cloud");
    assert_eq!(created.questions.len(), 2);
    assert_eq!(created.questions[0].answers.len(), 2);

    let reloaded = service.questions_by_set_id(created.set_id).unwrap();
    assert_eq!(reloaded, created.questions);
}

#[test]
fn create_assessment_duplicate_name_is_conflict() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let err = service
        .create_assessment(&draft("Cloud Readiness"))
        .unwrap_err();

    assert!(matches!(err, AssessmentError::Conflict));
    assert_eq!(err.to_string(), "set already exists");
}

#[test]
fn replace_answers_swaps_only_the_target_question() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let first = created.questions[0].question_id;
    let second = created.questions[1].question_id;

    let message = service
        .replace_answers(
            created.set_id,
            first,
            vec![Answer {
                text: "Everywhere".to_string(),
                suggestion: "Document the module registry".to_string(),
            }],
        )
        .unwrap();
    assert_eq!(message, "Question updated successfully");

    let questions = service.questions_by_set_id(created.set_id).unwrap();
    let updated = questions.iter().find(|q| q.question_id == first).unwrap();
    assert_eq!(updated.answers.len(), 1);
    assert_eq!(updated.answers[0].text, "Everywhere");

    // Sibling question and set attributes are untouched.
    let sibling = questions.iter().find(|q| q.question_id == second).unwrap();
    assert_eq!(sibling.answers, created.questions[1].answers);
    let sets = service.all_assessments().unwrap();
    assert_eq!(sets[0].set_name, "Cloud Readiness");
    assert_eq!(sets[0].set_id, created.set_id);
}

#[test]
fn replace_answers_with_empty_list_clears_answers() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let first = created.questions[0].question_id;

    service
        .replace_answers(created.set_id, first, Vec::new())
        .unwrap();

    let questions = service.questions_by_set_id(created.set_id).unwrap();
    let updated = questions.iter().find(|q| q.question_id == first).unwrap();
    assert!(updated.answers.is_empty());
}

#[test]
fn replace_answers_missing_set_reports_original_message() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let err = service.replace_answers(404, 1, Vec::new()).unwrap_err();

    match err {
        AssessmentError::NotFound(message) => assert_eq!(message, "Set name is invalid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn replace_answers_missing_question_in_existing_set_fails() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let err = service
        .replace_answers(created.set_id, 9999, Vec::new())
        .unwrap_err();

    match err {
        AssessmentError::NotFound(message) => assert_eq!(message, "Question id is invalid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_question_removes_exactly_the_target() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let first = created.questions[0].question_id;
    let second = created.questions[1].question_id;

    let receipt = service.delete_question(created.set_id, first).unwrap();
    assert_eq!(receipt.message, "Question deleted successfully");

    let questions = service.questions_by_set_id(created.set_id).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_id, second);
    assert!(service.fetch_question(first).unwrap().is_none());
}

#[test]
fn delete_question_question_store_and_set_stay_in_sync() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));
        let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
        let first = created.questions[0].question_id;
        service.delete_question(created.set_id, first).unwrap();
    }

    // The standalone question record is gone, along with its answers.
    let question_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM questions;", [], |row| row.get(0))
        .unwrap();
    let answer_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM answers a
             WHERE NOT EXISTS (
                 SELECT 1 FROM questions q WHERE q.question_id = a.question_id
             );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(question_rows, 1);
    assert_eq!(answer_rows, 0);
}

#[test]
fn delete_question_with_unknown_id_still_succeeds() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let receipt = service.delete_question(created.set_id, 9999).unwrap();

    assert_eq!(receipt.message, "Question deleted successfully");
    assert_eq!(
        service.questions_by_set_id(created.set_id).unwrap().len(),
        2
    );
}

#[test]
fn deleting_the_last_question_keeps_the_set() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service
        .create_assessment(&AssessmentDraft {
            set_name: "Single".to_string(),
            domain: "ops".to_string(),
            questions: vec![QuestionDraft {
                description: "Only question".to_string(),
                answers: Vec::new(),
            }],
        })
        .unwrap();
    let only = created.questions[0].question_id;

    service.delete_question(created.set_id, only).unwrap();

    let set_questions = service.questions_by_set_id(created.set_id).unwrap();
    assert!(set_questions.is_empty());
    assert_eq!(service.all_assessments().unwrap().len(), 1);
}

#[test]
fn delete_question_missing_set_reports_original_message() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let err = service.delete_question(404, 1).unwrap_err();
    match err {
        AssessmentError::NotFound(message) => assert_eq!(message, "Set name is invalid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn questions_by_set_name_uses_exact_match() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    service.create_assessment(&draft("Cloud Readiness")).unwrap();

    let questions = service.questions_by_set_name("Cloud Readiness").unwrap();
    assert_eq!(questions.len(), 2);

    let err = service.questions_by_set_name("cloud readiness").unwrap_err();
    match err {
        AssessmentError::NotFound(message) => assert_eq!(message, "set name is invalid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn questions_by_set_id_missing_reports_original_message() {
    let mut conn = open_db_in_memory().unwrap();
    let service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let err = service.questions_by_set_id(404).unwrap_err();
    match err {
        AssessmentError::NotFound(message) => assert_eq!(message, "set id is invalid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_question_reads_one_record_globally() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));

    let created = service.create_assessment(&draft("Cloud Readiness")).unwrap();
    let first = created.questions[0].question_id;

    let question = service.fetch_question(first).unwrap().unwrap();
    assert_eq!(question.description, created.questions[0].description);
    assert!(service.fetch_question(9999).unwrap().is_none());
}

#[test]
fn blank_draft_fields_are_rejected_before_any_write() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = AssessmentService::new(SqliteSetRepository::new(&mut conn));
        let mut invalid = draft(" ");
        invalid.set_name = "  ".to_string();
        assert!(service.create_assessment(&invalid).is_err());
    }

    let set_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM sets;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(set_rows, 0);
}
