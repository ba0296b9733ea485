use crate::dto::test_dto::SaveDetailsRequest;
use crate::error::Result;
use crate::models::candidate_details::CandidateTestDetails;
use sqlx::PgPool;
use uuid::Uuid;

/// Candidate test metadata. Last-writer-wins: each save fully overwrites
/// the stored row, unlike the attempt record's additive merges.
#[derive(Clone)]
pub struct DetailsService {
    pool: PgPool,
}

impl DetailsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn save_details(&self, payload: SaveDetailsRequest) -> Result<(Uuid, Uuid)> {
        let candidate_id = payload.candidate_id.unwrap_or_else(Uuid::new_v4);
        let question_set_id = payload.question_set_id.unwrap_or_else(Uuid::new_v4);

        sqlx::query(
            r#"
            INSERT INTO candidate_test_details (
                candidate_id, question_set_id,
                role_title, skills, experience,
                work_arrangement, location, annual_compensation,
                test_start, test_end
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (candidate_id, question_set_id)
            DO UPDATE SET
                role_title = EXCLUDED.role_title,
                skills = EXCLUDED.skills,
                experience = EXCLUDED.experience,
                work_arrangement = EXCLUDED.work_arrangement,
                location = EXCLUDED.location,
                annual_compensation = EXCLUDED.annual_compensation,
                test_start = EXCLUDED.test_start,
                test_end = EXCLUDED.test_end,
                updated_at = NOW()
            "#,
        )
        .bind(candidate_id)
        .bind(question_set_id)
        .bind(payload.role_title)
        .bind(payload.skills)
        .bind(payload.experience)
        .bind(payload.work_arrangement)
        .bind(payload.location)
        .bind(payload.annual_compensation)
        .bind(payload.test_start)
        .bind(payload.test_end)
        .execute(&self.pool)
        .await?;

        Ok((candidate_id, question_set_id))
    }

    pub async fn get_details(
        &self,
        candidate_id: Uuid,
        question_set_id: Uuid,
    ) -> Result<Option<CandidateTestDetails>> {
        let details = sqlx::query_as::<_, CandidateTestDetails>(
            r#"
            SELECT candidate_id, question_set_id,
                   role_title, skills, experience,
                   work_arrangement, location, annual_compensation,
                   test_start, test_end, updated_at
            FROM candidate_test_details
            WHERE candidate_id = $1 AND question_set_id = $2
            "#,
        )
        .bind(candidate_id)
        .bind(question_set_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(details)
    }
}
