//! Merge-semantics tests against a live Postgres. Each test skips unless
//! DATABASE_URL is set; run them with a disposable database, e.g.
//! `DATABASE_URL=postgres://localhost/assessment_test cargo test`.

use assessment_backend::dto::test_dto::SaveDetailsRequest;
use assessment_backend::models::attempt::AttemptPatch;
use assessment_backend::services::attempt_service::AttemptService;
use assessment_backend::services::details_service::DetailsService;
use assessment_backend::services::question_service::QuestionService;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping: DATABASE_URL not set");
            return None;
        }
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(pool)
}

#[tokio::test]
async fn violation_counters_are_last_write_wins() {
    let Some(pool) = test_pool().await else { return };
    let svc = AttemptService::new(pool);
    let (candidate_id, question_set_id) = svc.create_session(None, None).await.expect("session");

    svc.upsert(candidate_id, question_set_id, AttemptPatch::violations(3, 1, 0))
        .await
        .expect("first save");
    svc.upsert(candidate_id, question_set_id, AttemptPatch::violations(5, 2, 1))
        .await
        .expect("second save");

    let record = svc
        .fetch(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("record exists");
    assert_eq!(record.tab_switches, Some(5));
    assert_eq!(record.inactivities, Some(2));
    assert_eq!(record.face_not_visible, Some(1));
}

#[tokio::test]
async fn media_uploads_do_not_erase_each_other() {
    let Some(pool) = test_pool().await else { return };
    let svc = AttemptService::new(pool);
    let candidate_id = Uuid::new_v4();
    let question_set_id = Uuid::new_v4();

    svc.upsert(
        candidate_id,
        question_set_id,
        AttemptPatch::audio("/uploads/a.webm".to_string(), json!([{"q": "1"}])),
    )
    .await
    .expect("audio upsert");
    svc.upsert(
        candidate_id,
        question_set_id,
        AttemptPatch::video("/uploads/v.webm".to_string(), json!([{"q": "2"}])),
    )
    .await
    .expect("video upsert");

    let record = svc
        .fetch(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("record exists");
    assert_eq!(record.audio_url.as_deref(), Some("/uploads/a.webm"));
    assert_eq!(record.video_url.as_deref(), Some("/uploads/v.webm"));

    let qa = record.qa_data.expect("qa_data");
    let qa = qa.as_array().expect("array");
    assert_eq!(qa.len(), 2);
    assert_eq!(qa[0]["q"], "1");
    assert_eq!(qa[1]["q"], "2");

    // A violation save in between must not touch either URL.
    svc.upsert(candidate_id, question_set_id, AttemptPatch::violations(1, 0, 0))
        .await
        .expect("violations upsert");
    let record = svc
        .fetch(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("record exists");
    assert_eq!(record.audio_url.as_deref(), Some("/uploads/a.webm"));
    assert_eq!(record.video_url.as_deref(), Some("/uploads/v.webm"));
}

#[tokio::test]
async fn section_results_concatenate_in_submission_order() {
    let Some(pool) = test_pool().await else { return };
    let svc = AttemptService::new(pool);
    let candidate_id = Uuid::new_v4();
    let question_set_id = Uuid::new_v4();

    svc.upsert(
        candidate_id,
        question_set_id,
        AttemptPatch::results(json!([
            {"section_name": "a", "score": 1.0},
            {"section_name": "a", "score": 0.0}
        ])),
    )
    .await
    .expect("section a");
    svc.upsert(
        candidate_id,
        question_set_id,
        AttemptPatch::results(json!([{"section_name": "b", "score": null}])),
    )
    .await
    .expect("section b");

    let record = svc
        .fetch(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("record exists");
    let results = record.results_data.expect("results_data");
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["section_name"], "a");
    assert_eq!(results[2]["section_name"], "b");
}

#[tokio::test]
async fn fresh_session_is_immediately_readable_with_no_questions() {
    let Some(pool) = test_pool().await else { return };
    let attempts = AttemptService::new(pool.clone());
    let questions = QuestionService::new(pool);

    let (candidate_id, question_set_id) =
        attempts.create_session(None, None).await.expect("session");
    assert_eq!(candidate_id.get_version_num(), 4);
    assert_eq!(question_set_id.get_version_num(), 4);

    let record = attempts
        .fetch(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("placeholder row exists");
    assert!(record.audio_url.is_none());
    assert!(record.results_data.is_none());

    let views = questions
        .list_questions(question_set_id)
        .await
        .expect("list");
    assert!(views.is_empty());
}

#[tokio::test]
async fn details_saves_are_full_overwrites() {
    let Some(pool) = test_pool().await else { return };
    let svc = DetailsService::new(pool);
    let candidate_id = Uuid::new_v4();
    let question_set_id = Uuid::new_v4();

    svc.save_details(SaveDetailsRequest {
        candidate_id: Some(candidate_id),
        question_set_id: Some(question_set_id),
        role_title: Some("Backend Engineer".to_string()),
        skills: Some(json!(["rust", "postgres"])),
        experience: Some("5 years".to_string()),
        location: Some("Remote".to_string()),
        ..Default::default()
    })
    .await
    .expect("first save");

    svc.save_details(SaveDetailsRequest {
        candidate_id: Some(candidate_id),
        question_set_id: Some(question_set_id),
        role_title: Some("Platform Engineer".to_string()),
        skills: Some(json!(["go"])),
        ..Default::default()
    })
    .await
    .expect("second save");

    let details = svc
        .get_details(candidate_id, question_set_id)
        .await
        .expect("fetch")
        .expect("row exists");
    assert_eq!(details.role_title.as_deref(), Some("Platform Engineer"));
    assert_eq!(details.skills, Some(json!(["go"])));
    // Last-writer-wins means fields absent from the second save are cleared.
    assert!(details.experience.is_none());
    assert!(details.location.is_none());
}

#[tokio::test]
async fn saved_questions_round_trip_into_views() {
    let Some(pool) = test_pool().await else { return };
    let svc = QuestionService::new(pool);

    let raw = vec![
        json!({
            "type": "mcq",
            "skill": "rust",
            "difficulty": "easy",
            "time_limit": 45,
            "positive_marking": 1.0,
            "negative_marking": 0.0,
            "question": "Which keyword declares an immutable binding?",
            "options": ["A. let", "B. mut", "C. static", "D. const"],
            "correct_answer": "A"
        }),
        json!({
            "type": "video",
            "skill": "communication",
            "difficulty": "medium",
            "content": {
                "prompt_text": "Walk us through a recent design decision.",
                "rubric": "structure, tradeoffs",
                "suggested_time_seconds": 90
            }
        }),
    ];

    let question_set_id = svc.save_questions(None, &raw).await.expect("save");
    let views = svc.list_questions(question_set_id).await.expect("list");
    assert_eq!(views.len(), 2);

    // Views come back in submission order.
    let mcq = &views[0];
    assert_eq!(
        mcq.question_type,
        assessment_backend::models::question::QuestionType::Mcq
    );
    assert_eq!(
        mcq.question.as_deref(),
        Some("Which keyword declares an immutable binding?")
    );
    assert_eq!(mcq.correct_answer.as_deref(), Some("A"));
    assert_eq!(mcq.time_limit, Some(45));
    assert!(mcq.prompt_text.is_none());
    assert!(mcq.rubric.is_none());

    let video = &views[1];
    assert_eq!(
        video.question_type,
        assessment_backend::models::question::QuestionType::Video
    );
    assert_eq!(
        video.prompt_text.as_deref(),
        Some("Walk us through a recent design decision.")
    );
    assert_eq!(video.suggested_time_seconds, Some(90));
    assert!(video.options.is_none());
    assert!(video.correct_answer.is_none());
}
