use crate::models::question::{QuestionType, QuestionView};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveQuestionsRequest {
    pub question_set_id: Option<Uuid>,
    #[serde(default)]
    pub questions: Vec<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveQuestionsResponse {
    pub message: String,
    pub question_set_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuestionRequest {
    #[validate(length(min = 1, message = "skill must not be empty"))]
    pub skill: String,
    #[validate(length(min = 1, message = "difficulty must not be empty"))]
    pub difficulty: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTestResponse {
    pub question_set_id: Uuid,
    pub questions: Vec<QuestionView>,
}
