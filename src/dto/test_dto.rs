use crate::models::evaluation::EvaluationResult;
use crate::models::question::QuestionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub candidate_id: Option<Uuid>,
    pub question_set_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
}

/// Counters are authoritative cumulative values from the client; a field
/// omitted from the body counts as zero, matching the proctoring widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveViolationsRequest {
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
    #[serde(default)]
    pub tab_switches: i32,
    #[serde(default)]
    pub inactivities: i32,
    #[serde(default)]
    pub face_not_visible: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResponse {
    pub question_id: Option<Uuid>,
    pub question_type: QuestionType,
    pub question_text: Option<String>,
    pub correct_answer: Option<String>,
    pub candidate_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitSectionRequest {
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
    #[validate(length(min = 1, message = "section_name must not be empty"))]
    pub section_name: String,
    #[serde(default)]
    pub responses: Vec<SectionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSectionResponse {
    pub message: String,
    pub evaluations: Vec<EvaluationResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveDetailsRequest {
    pub candidate_id: Option<Uuid>,
    pub question_set_id: Option<Uuid>,
    pub role_title: Option<String>,
    pub skills: Option<JsonValue>,
    pub experience: Option<String>,
    pub work_arrangement: Option<String>,
    pub location: Option<String>,
    pub annual_compensation: Option<String>,
    pub test_start: Option<DateTime<Utc>>,
    pub test_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDetailsResponse {
    pub message: String,
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
}
