use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    Coding,
    Audio,
    Video,
}

impl QuestionType {
    /// Objective types have a mechanically checkable answer and are
    /// eligible for automated scoring.
    pub fn is_objective(&self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::Coding)
    }
}

/// Storage envelope for one question: flat metadata plus a type-specific
/// payload nested under `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub skill: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit: Option<i32>,
    pub positive_marking: Option<f64>,
    pub negative_marking: Option<f64>,
    #[serde(flatten)]
    pub payload: QuestionPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum QuestionPayload {
    Mcq(ObjectiveContent),
    Coding(ObjectiveContent),
    Audio(OpenEndedContent),
    Video(OpenEndedContent),
}

impl QuestionPayload {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionPayload::Mcq(_) => QuestionType::Mcq,
            QuestionPayload::Coding(_) => QuestionType::Coding,
            QuestionPayload::Audio(_) => QuestionType::Audio,
            QuestionPayload::Video(_) => QuestionType::Video,
        }
    }
}

/// Keys beyond the canonical ones (e.g. a coding question's `input_spec`
/// and `examples`) ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveContent {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenEndedContent {
    pub prompt_text: Option<String>,
    pub media_url: Option<String>,
    pub rubric: Option<String>,
    pub suggested_time_seconds: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Uniform client-facing shape regardless of question type; fields that do
/// not apply to a type are serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub question_id: Uuid,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub skill: Option<String>,
    pub difficulty: Option<String>,
    pub time_limit: Option<i32>,
    pub positive_marking: Option<f64>,
    pub negative_marking: Option<f64>,
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub prompt_text: Option<String>,
    pub media_url: Option<String>,
    pub rubric: Option<String>,
    pub suggested_time_seconds: Option<i32>,
}

const METADATA_KEYS: [&str; 6] = [
    "type",
    "skill",
    "difficulty",
    "time_limit",
    "positive_marking",
    "negative_marking",
];

impl StoredQuestion {
    /// Normalize a raw question into the storage envelope. Accepts both the
    /// already-nested shape (`content` key present) and the flat shape the
    /// generator emits; metadata keys are hoisted to the top level and the
    /// remainder becomes the nested payload.
    pub fn normalize(raw: &JsonValue) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| Error::BadRequest("question must be a JSON object".to_string()))?;

        let mut envelope = Map::new();
        for key in METADATA_KEYS {
            if let Some(value) = obj.get(key) {
                envelope.insert(key.to_string(), value.clone());
            }
        }

        let mut content = match obj.get("content") {
            Some(nested) => nested.clone(),
            None => {
                let mut rest = obj.clone();
                for key in METADATA_KEYS {
                    rest.remove(key);
                }
                JsonValue::Object(rest)
            }
        };
        // The generator emits `prompt`/`answer`; canonicalize to the keys
        // the client view exposes.
        if let Some(map) = content.as_object_mut() {
            for (from, to) in [("prompt", "question"), ("answer", "correct_answer")] {
                if let Some(value) = map.remove(from) {
                    map.entry(to).or_insert(value);
                }
            }
        }
        envelope.insert("content".to_string(), content);

        serde_json::from_value(JsonValue::Object(envelope))
            .map_err(|e| Error::BadRequest(format!("invalid question: {}", e)))
    }

    pub fn question_type(&self) -> QuestionType {
        self.payload.question_type()
    }

    pub fn into_view(self, id: Uuid) -> QuestionView {
        let question_type = self.question_type();
        let mut view = QuestionView {
            id,
            question_id: id,
            question_type,
            skill: self.skill,
            difficulty: self.difficulty,
            time_limit: self.time_limit,
            positive_marking: self.positive_marking,
            negative_marking: self.negative_marking,
            question: None,
            options: None,
            correct_answer: None,
            prompt_text: None,
            media_url: None,
            rubric: None,
            suggested_time_seconds: None,
        };
        match self.payload {
            QuestionPayload::Mcq(content) | QuestionPayload::Coding(content) => {
                view.question = content.question;
                view.options = content.options;
                view.correct_answer = content.correct_answer;
            }
            QuestionPayload::Audio(content) | QuestionPayload::Video(content) => {
                view.prompt_text = content.prompt_text;
                view.media_url = content.media_url;
                view.rubric = content.rubric;
                view.suggested_time_seconds = content.suggested_time_seconds;
            }
        }
        view
    }
}
