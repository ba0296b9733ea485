use crate::config::Config;
use crate::error::Result;
use crate::models::evaluation::Evaluation;
use crate::models::question::QuestionType;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Boundary to the external grading model. The pipeline depends on this
/// trait so a failing collaborator can be simulated in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerScorer: Send + Sync {
    async fn evaluate(
        &self,
        question_type: QuestionType,
        question_text: &str,
        correct_answer: &str,
        candidate_answer: &str,
    ) -> Result<Evaluation>;
}

/// Generation output: either parsed question JSON, or the raw model text
/// when the response is not valid JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeneratedQuestion {
    Structured(JsonValue),
    Raw { raw: String },
}

#[derive(Clone)]
pub struct ScoringService {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

const EVALUATE_SYSTEM_PROMPT: &str = "You are a strict examiner grading one candidate answer. \
Compare the candidate answer against the reference answer for the given question. \
Output a JSON object with keys 'score' (number between 0 and 1), 'is_correct' (boolean) \
and 'feedback' (short string).";

const GENERATE_SYSTEM_PROMPT: &str = "You are a helpful interview question generator.";

impl ScoringService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.openrouter_api_key.clone(),
            url: config.openrouter_url.clone(),
            model: config.openrouter_model.clone(),
        }
    }

    async fn chat(&self, system: &str, user: String, temperature: f32) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: String,
        }
        #[derive(Serialize)]
        struct ResponseFormat<'a> {
            #[serde(rename = "type")]
            r#type: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            temperature: f32,
            response_format: ResponseFormat<'a>,
            messages: Vec<Msg<'a>>,
        }
        #[derive(Deserialize)]
        struct RespChoiceMsg {
            content: String,
        }
        #[derive(Deserialize)]
        struct RespChoice {
            message: RespChoiceMsg,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<RespChoice>,
        }

        let req = Req {
            model: &self.model,
            temperature,
            response_format: ResponseFormat {
                r#type: "json_object",
            },
            messages: vec![
                Msg {
                    role: "system",
                    content: system.to_string(),
                },
                Msg {
                    role: "user",
                    content: user,
                },
            ],
        };

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        let body: Resp = resp.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| crate::error::Error::Internal("model returned no choices".to_string()))?;
        Ok(content)
    }

    /// Generation path. A model response that fails to parse as JSON is
    /// returned verbatim under `raw` instead of failing the request.
    pub async fn generate_question(
        &self,
        skill: &str,
        difficulty: &str,
        question_type: QuestionType,
        options_count: u8,
    ) -> Result<GeneratedQuestion> {
        let prompt = generation_prompt(question_type, skill, difficulty, options_count);
        let content = self.chat(GENERATE_SYSTEM_PROMPT, prompt, 0.3).await?;
        Ok(parse_generated(content))
    }
}

#[async_trait]
impl AnswerScorer for ScoringService {
    async fn evaluate(
        &self,
        question_type: QuestionType,
        question_text: &str,
        correct_answer: &str,
        candidate_answer: &str,
    ) -> Result<Evaluation> {
        let user = serde_json::json!({
            "question_type": question_type,
            "question_text": question_text,
            "correct_answer": correct_answer,
            "candidate_answer": candidate_answer,
            "schema": {
                "type": "object",
                "required": ["score", "is_correct", "feedback"],
                "properties": {
                    "score": {"type": "number"},
                    "is_correct": {"type": "boolean"},
                    "feedback": {"type": "string"}
                }
            }
        });
        let content = self
            .chat(EVALUATE_SYSTEM_PROMPT, serde_json::to_string(&user)?, 0.1)
            .await?;
        parse_evaluation(&content)
    }
}

fn generation_prompt(
    question_type: QuestionType,
    skill: &str,
    difficulty: &str,
    options_count: u8,
) -> String {
    match question_type {
        QuestionType::Mcq => format!(
            "Generate ONE multiple-choice question for skill '{}' with difficulty '{}'. \
             Provide {} answer options labeled A, B, C, D. \
             Return JSON ONLY with keys: prompt, options (list), answer (single letter).",
            skill, difficulty, options_count
        ),
        QuestionType::Coding => format!(
            "Generate ONE coding question for skill '{}' with difficulty '{}'. \
             Return JSON ONLY with keys: prompt, input_spec, output_spec, examples (list).",
            skill, difficulty
        ),
        QuestionType::Audio => format!(
            "Generate ONE interview question for skill '{}' with difficulty '{}'. \
             The question should be short and clear. \
             Return JSON ONLY with keys: prompt_text, expected_keywords (list), rubric (short).",
            skill, difficulty
        ),
        QuestionType::Video => format!(
            "Generate ONE interview question for skill '{}' with difficulty '{}'. \
             The question should be short and clear. \
             Return JSON ONLY with keys: prompt_text, rubric (short), suggested_time_seconds.",
            skill, difficulty
        ),
    }
}

fn parse_evaluation(content: &str) -> Result<Evaluation> {
    let val: JsonValue = serde_json::from_str(content)?;
    Ok(Evaluation {
        score: val.get("score").and_then(|v| v.as_f64()),
        is_correct: val
            .get("is_correct")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        feedback: val
            .get("feedback")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
    })
}

fn parse_generated(content: String) -> GeneratedQuestion {
    match serde_json::from_str::<JsonValue>(&content) {
        Ok(value) => GeneratedQuestion::Structured(value),
        Err(_) => GeneratedQuestion::Raw { raw: content },
    }
}
