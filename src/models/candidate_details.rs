use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Descriptive test metadata per (candidate, question-set) pair.
/// Unlike the attempt record this is fully overwritten on each save.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateTestDetails {
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
    pub role_title: Option<String>,
    pub skills: Option<JsonValue>,
    pub experience: Option<String>,
    pub work_arrangement: Option<String>,
    pub location: Option<String>,
    pub annual_compensation: Option<String>,
    pub test_start: Option<DateTime<Utc>>,
    pub test_end: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
