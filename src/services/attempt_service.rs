use crate::models::attempt::{AttemptPatch, AttemptRecord};
use crate::error::Result;
use crate::services::merge;
use sqlx::PgPool;
use uuid::Uuid;

/// Durable keyed storage for one record per (candidate, question-set) pair.
/// All writes are partial-field merges through the shared upsert statement.
#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Merge a partial write into the attempt record, creating it if absent.
    /// The whole merge is one statement, so concurrent calls for the same
    /// key serialize at the database and no update is lost.
    pub async fn upsert(
        &self,
        candidate_id: Uuid,
        question_set_id: Uuid,
        patch: AttemptPatch,
    ) -> Result<()> {
        sqlx::query(merge::upsert_statement())
            .bind(candidate_id)
            .bind(question_set_id)
            .bind(patch.tab_switches)
            .bind(patch.inactivities)
            .bind(patch.face_not_visible)
            .bind(patch.audio_url)
            .bind(patch.video_url)
            .bind(patch.qa_entries)
            .bind(patch.result_entries)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a placeholder row if none exists yet. Later partial merges do
    /// not strictly need it, but it makes the pair immediately readable.
    pub async fn ensure_record(&self, candidate_id: Uuid, question_set_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO test_attempts (candidate_id, question_set_id)
            VALUES ($1, $2)
            ON CONFLICT (candidate_id, question_set_id) DO NOTHING
            "#,
        )
        .bind(candidate_id)
        .bind(question_set_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn fetch(
        &self,
        candidate_id: Uuid,
        question_set_id: Uuid,
    ) -> Result<Option<AttemptRecord>> {
        let record = sqlx::query_as::<_, AttemptRecord>(
            r#"
            SELECT candidate_id, question_set_id,
                   tab_switches, inactivities, face_not_visible,
                   audio_url, video_url, qa_data, results_data,
                   created_at, updated_at
            FROM test_attempts
            WHERE candidate_id = $1 AND question_set_id = $2
            "#,
        )
        .bind(candidate_id)
        .bind(question_set_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Allocate or accept the identifier pair and pre-warm the record.
    pub async fn create_session(
        &self,
        candidate_id: Option<Uuid>,
        question_set_id: Option<Uuid>,
    ) -> Result<(Uuid, Uuid)> {
        let candidate_id = candidate_id.unwrap_or_else(Uuid::new_v4);
        let question_set_id = question_set_id.unwrap_or_else(Uuid::new_v4);
        self.ensure_record(candidate_id, question_set_id).await?;
        Ok((candidate_id, question_set_id))
    }
}
