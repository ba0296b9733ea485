use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::question_dto::{
    GenerateQuestionRequest, SaveQuestionsRequest, SaveQuestionsResponse,
};
use crate::AppState;

#[axum::debug_handler]
pub async fn save_questions(
    State(state): State<AppState>,
    Json(req): Json<SaveQuestionsRequest>,
) -> crate::error::Result<Response> {
    let question_set_id = state
        .question_service
        .save_questions(req.question_set_id, &req.questions)
        .await?;
    Ok(Json(SaveQuestionsResponse {
        message: "Questions saved successfully".to_string(),
        question_set_id,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn generate_question(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let generated = state
        .scoring_service
        .generate_question(
            &req.skill,
            &req.difficulty,
            req.question_type,
            req.options.unwrap_or(4),
        )
        .await?;
    Ok(Json(generated).into_response())
}
