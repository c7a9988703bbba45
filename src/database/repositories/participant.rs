//! Participant repository implementation
//!
//! Registration inserts and the event participant counter move in one
//! transaction; the counter is a server-side increment guarded by the
//! event's capacity, so concurrent registrants can never over-admit or
//! leave the counter out of step with the participant rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::{ParticipantStore, PaymentPatch};
use crate::models::participant::Participant;
use crate::models::ticket::TicketCode;
use crate::utils::errors::{GenesisError, Result};

const PARTICIPANT_COLUMNS: &str = "id, event_id, full_name, email, phone, college, standard, stream, \
     ticket_code, payment_status, payment_method, receipt_url, transaction_id, registration_type, \
     entry_fee_paid, team_id, team_name, is_team_lead, is_verified, verification_time, assigned_room, \
     registered_at, updated_at";

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for ParticipantRepository {
    async fn insert_registration(&self, participants: Vec<Participant>) -> Result<Vec<Participant>> {
        let event_id = match participants.first() {
            Some(first) => first.event_id,
            None => return Ok(vec![]),
        };
        let delta = participants.len() as i32;

        let mut tx = self.pool.begin().await?;

        // capacity-guarded server-side increment; no row means the event is
        // missing or the cap would be exceeded
        let bumped: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE events
            SET current_participants = current_participants + $2, updated_at = $3
            WHERE id = $1
              AND is_active = TRUE
              AND (max_participants IS NULL OR current_participants + $2 <= max_participants)
            RETURNING id
            "#,
        )
        .bind(event_id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        if bumped.is_none() {
            tx.rollback().await?;
            return Err(GenesisError::CapacityExhausted { event_id });
        }

        let sql = format!(
            r#"
            INSERT INTO participants (id, event_id, full_name, email, phone, college, standard, stream,
                ticket_code, payment_status, payment_method, receipt_url, transaction_id, registration_type,
                entry_fee_paid, team_id, team_name, is_team_lead, is_verified, verification_time, assigned_room,
                registered_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                $19, $20, $21, $22, $23)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let mut inserted = Vec::with_capacity(participants.len());
        for participant in participants {
            let row = sqlx::query_as::<_, Participant>(&sql)
                .bind(participant.id)
                .bind(participant.event_id)
                .bind(participant.full_name)
                .bind(participant.email)
                .bind(participant.phone)
                .bind(participant.college)
                .bind(participant.standard)
                .bind(participant.stream)
                .bind(participant.ticket_code)
                .bind(participant.payment_status)
                .bind(participant.payment_method)
                .bind(participant.receipt_url)
                .bind(participant.transaction_id)
                .bind(participant.registration_type)
                .bind(participant.entry_fee_paid)
                .bind(participant.team_id)
                .bind(participant.team_name)
                .bind(participant.is_team_lead)
                .bind(participant.is_verified)
                .bind(participant.verification_time)
                .bind(participant.assigned_room)
                .bind(participant.registered_at)
                .bind(participant.updated_at)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Find participant by ID
    async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>> {
        let sql = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = $1");
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    /// Resolve a scanned ticket code to its participant
    async fn find_by_ticket_code(&self, code: &TicketCode) -> Result<Option<Participant>> {
        let sql = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE ticket_code = $1");
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    async fn find_by_email(&self, event_id: Uuid, email: &str) -> Result<Option<Participant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE event_id = $1 AND email = $2"
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(event_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Participant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE transaction_id = $1"
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    /// Get event participants ordered by registration time
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Participant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE event_id = $1 ORDER BY registered_at ASC"
        );
        let participants = sqlx::query_as::<_, Participant>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(participants)
    }

    async fn find_team_lead(&self, team_id: Uuid) -> Result<Option<Participant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE team_id = $1 AND is_team_lead = TRUE"
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(participant)
    }

    async fn update_payment(&self, id: Uuid, patch: PaymentPatch) -> Result<Participant> {
        let transaction_id = patch.transaction_id.clone().unwrap_or_default();
        let sql = format!(
            r#"
            UPDATE participants
            SET payment_status = COALESCE($2, payment_status),
                payment_method = COALESCE($3, payment_method),
                receipt_url = COALESCE($4, receipt_url),
                transaction_id = COALESCE($5, transaction_id),
                updated_at = $6
            WHERE id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .bind(patch.payment_status)
            .bind(patch.payment_method)
            .bind(patch.receipt_url)
            .bind(patch.transaction_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| map_unique_violation(err, &transaction_id))?
            .ok_or(GenesisError::ParticipantNotFound { participant_id: id })?;

        Ok(participant)
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        verification_time: DateTime<Utc>,
        assigned_room: Option<&str>,
    ) -> Result<Participant> {
        // COALESCE keeps the first scan's timestamp on re-scans
        let sql = format!(
            r#"
            UPDATE participants
            SET is_verified = TRUE,
                verification_time = COALESCE(verification_time, $2),
                assigned_room = COALESCE($3, assigned_room),
                updated_at = $4
            WHERE id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );
        let participant = sqlx::query_as::<_, Participant>(&sql)
            .bind(id)
            .bind(verification_time)
            .bind(assigned_room)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GenesisError::ParticipantNotFound { participant_id: id })?;

        Ok(participant)
    }

    /// Get participant count for event
    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

/// Translate the transaction-id uniqueness constraint into the domain error
fn map_unique_violation(err: sqlx::Error, transaction_id: &str) -> GenesisError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.constraint() == Some("participants_transaction_id_key") {
            return GenesisError::DuplicateTransactionId {
                transaction_id: transaction_id.to_string(),
            };
        }
    }
    GenesisError::Database(err)
}
