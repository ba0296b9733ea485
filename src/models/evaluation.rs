use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verdict returned by the scoring collaborator for a single answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: Option<f64>,
    pub is_correct: bool,
    pub feedback: String,
}

impl Evaluation {
    /// Degraded verdict used when the scoring collaborator fails or times
    /// out; one bad response must not block the rest of the batch.
    pub fn failed() -> Self {
        Self {
            score: Some(0.0),
            is_correct: false,
            feedback: "Evaluation failed".to_string(),
        }
    }

    /// Open-ended answers are never auto-scored.
    pub fn not_evaluated() -> Self {
        Self {
            score: None,
            is_correct: false,
            feedback: "Not evaluated".to_string(),
        }
    }
}

/// One entry of an attempt record's `results_data` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub question_id: Option<Uuid>,
    pub candidate_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub section_name: String,
    pub score: Option<f64>,
    pub is_correct: bool,
    pub feedback: String,
}
