//! Event repository implementation

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::EventStore;
use crate::models::event::{Event, UpdateEventRequest};
use crate::utils::errors::{GenesisError, Result};

const EVENT_COLUMNS: &str = "id, name, description, date, event_day, entry_fee, on_spot_entry_fee, \
     payment_channel, on_spot_payment_channel, is_team_event, members_per_team, max_teams, \
     max_participants, current_participants, registration_start_date, registration_start_time, \
     registration_end_date, registration_end_time, allow_on_spot_registration, on_spot_start_time, \
     on_spot_end_time, daily_registration_closure, registration_controls, is_active, created_at, \
     updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    /// Create a new event
    async fn create_event(&self, event: Event) -> Result<Event> {
        let sql = format!(
            r#"
            INSERT INTO events (id, name, description, date, event_day, entry_fee, on_spot_entry_fee,
                payment_channel, on_spot_payment_channel, is_team_event, members_per_team, max_teams,
                max_participants, current_participants, registration_start_date, registration_start_time,
                registration_end_date, registration_end_time, allow_on_spot_registration, on_spot_start_time,
                on_spot_end_time, daily_registration_closure, registration_controls, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                $19, $20, $21, $22, $23, $24, $25, $26)
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Event>(&sql)
            .bind(event.id)
            .bind(event.name)
            .bind(event.description)
            .bind(event.date)
            .bind(event.event_day)
            .bind(event.entry_fee)
            .bind(event.on_spot_entry_fee)
            .bind(event.payment_channel)
            .bind(event.on_spot_payment_channel)
            .bind(event.is_team_event)
            .bind(event.members_per_team)
            .bind(event.max_teams)
            .bind(event.max_participants)
            .bind(event.current_participants)
            .bind(event.registration_start_date)
            .bind(event.registration_start_time)
            .bind(event.registration_end_date)
            .bind(event.registration_end_time)
            .bind(event.allow_on_spot_registration)
            .bind(event.on_spot_start_time)
            .bind(event.on_spot_end_time)
            .bind(event.daily_registration_closure)
            .bind(event.registration_controls)
            .bind(event.is_active)
            .bind(event.created_at)
            .bind(event.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Find event by ID
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    /// List active events ordered by date
    async fn list_active_events(&self) -> Result<Vec<Event>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE is_active = TRUE ORDER BY date ASC, name ASC"
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Update event
    async fn update_event(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event> {
        let sql = format!(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                entry_fee = COALESCE($5, entry_fee),
                on_spot_entry_fee = COALESCE($6, on_spot_entry_fee),
                registration_start_date = COALESCE($7, registration_start_date),
                registration_start_time = COALESCE($8, registration_start_time),
                registration_end_date = COALESCE($9, registration_end_date),
                registration_end_time = COALESCE($10, registration_end_time),
                allow_on_spot_registration = COALESCE($11, allow_on_spot_registration),
                on_spot_start_time = COALESCE($12, on_spot_start_time),
                on_spot_end_time = COALESCE($13, on_spot_end_time),
                registration_controls = COALESCE($14, registration_controls),
                is_active = COALESCE($15, is_active),
                updated_at = $16
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.date)
            .bind(patch.entry_fee)
            .bind(patch.on_spot_entry_fee)
            .bind(patch.registration_start_date)
            .bind(patch.registration_start_time)
            .bind(patch.registration_end_date)
            .bind(patch.registration_end_time)
            .bind(patch.allow_on_spot_registration)
            .bind(patch.on_spot_start_time)
            .bind(patch.on_spot_end_time)
            .bind(patch.registration_controls.map(sqlx::types::Json))
            .bind(patch.is_active)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    /// Flip the daily closure flag for one date
    async fn set_daily_closure(&self, id: Uuid, date: NaiveDate, closed: bool) -> Result<Event> {
        let sql = format!(
            r#"
            UPDATE events
            SET daily_registration_closure =
                    jsonb_set(daily_registration_closure, ARRAY[$2::text], to_jsonb($3::boolean), TRUE),
                updated_at = $4
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(date.format("%Y-%m-%d").to_string())
            .bind(closed)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    /// Soft-delete an event
    async fn deactivate_event(&self, id: Uuid) -> Result<Event> {
        let sql = format!(
            "UPDATE events SET is_active = FALSE, updated_at = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    /// Number of distinct registered teams
    async fn count_teams(&self, event_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT team_id) FROM participants WHERE event_id = $1 AND team_id IS NOT NULL",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
