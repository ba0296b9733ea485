use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::question_dto::StartTestResponse;
use crate::dto::test_dto::{
    CreateSessionRequest, CreateSessionResponse, SaveDetailsRequest, SaveDetailsResponse,
    SaveViolationsRequest, SubmitSectionRequest, SubmitSectionResponse,
};
use crate::models::attempt::AttemptPatch;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_test(
    State(state): State<AppState>,
    Path(question_set_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let questions = state
        .question_service
        .list_questions(question_set_id)
        .await?;
    Ok(Json(StartTestResponse {
        question_set_id,
        questions,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> crate::error::Result<Response> {
    let (candidate_id, question_set_id) = state
        .attempt_service
        .create_session(req.candidate_id, req.question_set_id)
        .await?;
    tracing::info!(%candidate_id, %question_set_id, "session created");
    Ok(Json(CreateSessionResponse {
        candidate_id,
        question_set_id,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn save_violations(
    State(state): State<AppState>,
    Json(req): Json<SaveViolationsRequest>,
) -> crate::error::Result<Response> {
    state
        .attempt_service
        .upsert(
            req.candidate_id,
            req.question_set_id,
            AttemptPatch::violations(req.tab_switches, req.inactivities, req.face_not_visible),
        )
        .await?;
    Ok(Json(json!({ "message": "Violations updated" })).into_response())
}

#[axum::debug_handler]
pub async fn submit_section(
    State(state): State<AppState>,
    Json(req): Json<SubmitSectionRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let evaluations = state
        .evaluation_service
        .submit_section(
            req.candidate_id,
            req.question_set_id,
            &req.section_name,
            &req.responses,
        )
        .await?;
    tracing::info!(
        candidate_id = %req.candidate_id,
        section = %req.section_name,
        responses = req.responses.len(),
        "section stored"
    );
    Ok(Json(SubmitSectionResponse {
        message: "Section stored".to_string(),
        evaluations,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn save_details(
    State(state): State<AppState>,
    Json(req): Json<SaveDetailsRequest>,
) -> crate::error::Result<Response> {
    let (candidate_id, question_set_id) = state.details_service.save_details(req).await?;
    Ok(Json(SaveDetailsResponse {
        message: "Test details saved successfully".to_string(),
        candidate_id,
        question_set_id,
    })
    .into_response())
}
