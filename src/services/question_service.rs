use crate::error::{Error, Result};
use crate::models::question::{QuestionView, StoredQuestion};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct QuestionRow {
    id: Uuid,
    content: JsonValue,
}

/// Normalizes heterogeneous question payloads into the storage envelope on
/// the way in, and flattens them into one uniform view on the way out.
#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Normalize and persist a batch of raw questions under one question
    /// set. Every question is validated before the first row is written.
    pub async fn save_questions(
        &self,
        question_set_id: Option<Uuid>,
        questions: &[JsonValue],
    ) -> Result<Uuid> {
        let question_set_id = question_set_id.unwrap_or_else(Uuid::new_v4);

        let normalized = questions
            .iter()
            .map(StoredQuestion::normalize)
            .collect::<Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;
        for (position, stored) in normalized.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO questions (id, question_set_id, position, content)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(question_set_id)
            .bind(position as i32)
            .bind(serde_json::to_value(stored)?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(
            %question_set_id,
            count = normalized.len(),
            "saved question set"
        );
        Ok(question_set_id)
    }

    /// Materialize every stored question of a set as a flat client view.
    /// An unknown set id yields an empty list, not an error.
    pub async fn list_questions(&self, question_set_id: Uuid) -> Result<Vec<QuestionView>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, content
            FROM questions
            WHERE question_set_id = $1
            ORDER BY position
            "#,
        )
        .bind(question_set_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let stored: StoredQuestion = serde_json::from_value(row.content)
                    .map_err(|e| Error::Internal(format!("corrupt question row {}: {}", row.id, e)))?;
                Ok(stored.into_view(row.id))
            })
            .collect()
    }
}
