use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// One durable row per (candidate, question-set) pair, aggregating
/// proctoring counters, recording URLs, the Q&A log and evaluation results.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttemptRecord {
    pub candidate_id: Uuid,
    pub question_set_id: Uuid,
    pub tab_switches: Option<i32>,
    pub inactivities: Option<i32>,
    pub face_not_visible: Option<i32>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub qa_data: Option<JsonValue>,
    pub results_data: Option<JsonValue>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial write against an attempt record. `None` fields leave the stored
/// value untouched; `qa_entries`/`result_entries` are arrays to append.
#[derive(Debug, Clone, Default)]
pub struct AttemptPatch {
    pub tab_switches: Option<i32>,
    pub inactivities: Option<i32>,
    pub face_not_visible: Option<i32>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub qa_entries: Option<JsonValue>,
    pub result_entries: Option<JsonValue>,
}

impl AttemptPatch {
    pub fn violations(tab_switches: i32, inactivities: i32, face_not_visible: i32) -> Self {
        Self {
            tab_switches: Some(tab_switches),
            inactivities: Some(inactivities),
            face_not_visible: Some(face_not_visible),
            ..Default::default()
        }
    }

    pub fn audio(url: String, qa_entries: JsonValue) -> Self {
        Self {
            audio_url: Some(url),
            qa_entries: Some(qa_entries),
            ..Default::default()
        }
    }

    pub fn video(url: String, qa_entries: JsonValue) -> Self {
        Self {
            video_url: Some(url),
            qa_entries: Some(qa_entries),
            ..Default::default()
        }
    }

    pub fn results(entries: JsonValue) -> Self {
        Self {
            result_entries: Some(entries),
            ..Default::default()
        }
    }
}
