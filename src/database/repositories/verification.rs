//! Verification record repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::VerificationStore;
use crate::models::verification::VerificationRecord;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationStore for VerificationRepository {
    /// Append one audit record; the table is insert-only
    async fn append_record(&self, record: VerificationRecord) -> Result<VerificationRecord> {
        let inserted = sqlx::query_as::<_, VerificationRecord>(
            r#"
            INSERT INTO verification_records (id, participant_id, actor, recorded_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, participant_id, actor, recorded_at
            "#,
        )
        .bind(record.id)
        .bind(record.participant_id)
        .bind(record.actor)
        .bind(record.recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn list_for_participant(&self, participant_id: Uuid) -> Result<Vec<VerificationRecord>> {
        let records = sqlx::query_as::<_, VerificationRecord>(
            "SELECT id, participant_id, actor, recorded_at FROM verification_records WHERE participant_id = $1 ORDER BY recorded_at ASC",
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
