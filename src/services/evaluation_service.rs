use crate::dto::test_dto::SectionResponse;
use crate::error::Result;
use crate::models::attempt::AttemptPatch;
use crate::models::evaluation::{Evaluation, EvaluationResult};
use crate::services::attempt_service::AttemptService;
use crate::services::scoring_service::AnswerScorer;
use std::sync::Arc;
use uuid::Uuid;

/// Scores a batch of section responses and appends the results to the
/// attempt record in one logical operation.
#[derive(Clone)]
pub struct EvaluationService {
    scorer: Arc<dyn AnswerScorer>,
    attempts: AttemptService,
}

impl EvaluationService {
    pub fn new(scorer: Arc<dyn AnswerScorer>, attempts: AttemptService) -> Self {
        Self { scorer, attempts }
    }

    pub async fn submit_section(
        &self,
        candidate_id: Uuid,
        question_set_id: Uuid,
        section_name: &str,
        responses: &[SectionResponse],
    ) -> Result<Vec<EvaluationResult>> {
        let results = evaluate_responses(self.scorer.as_ref(), section_name, responses).await;
        let entries = serde_json::to_value(&results)?;
        self.attempts
            .upsert(candidate_id, question_set_id, AttemptPatch::results(entries))
            .await?;
        Ok(results)
    }
}

/// Per-response scoring. Objective types go to the collaborator; a
/// collaborator failure degrades that one response instead of aborting the
/// batch. Open-ended types are never sent out.
pub async fn evaluate_responses(
    scorer: &dyn AnswerScorer,
    section_name: &str,
    responses: &[SectionResponse],
) -> Vec<EvaluationResult> {
    let mut results = Vec::with_capacity(responses.len());
    for response in responses {
        let evaluation = if response.question_type.is_objective() {
            match scorer
                .evaluate(
                    response.question_type,
                    response.question_text.as_deref().unwrap_or(""),
                    response.correct_answer.as_deref().unwrap_or(""),
                    response.candidate_answer.as_deref().unwrap_or(""),
                )
                .await
            {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    tracing::warn!(
                        error = ?e,
                        question_id = ?response.question_id,
                        "scoring call failed, recording degraded result"
                    );
                    Evaluation::failed()
                }
            }
        } else {
            Evaluation::not_evaluated()
        };

        results.push(EvaluationResult {
            question_id: response.question_id,
            candidate_answer: response.candidate_answer.clone(),
            correct_answer: response.correct_answer.clone(),
            section_name: section_name.to_string(),
            score: evaluation.score,
            is_correct: evaluation.is_correct,
            feedback: evaluation.feedback,
        });
    }
    results
}
