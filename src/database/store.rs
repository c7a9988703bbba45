//! Store trait seam
//!
//! The injectable store interface the services depend on. Each trait is an
//! `async_trait` collaborator implemented by both the in-memory backend
//! ([`crate::database::memory::MemoryStore`]) and the Postgres repositories
//! under [`crate::database::repositories`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::event::{Event, UpdateEventRequest};
use crate::models::participant::{Participant, PaymentMethod, PaymentStatus};
use crate::models::ticket::TicketCode;
use crate::models::verification::VerificationRecord;
use crate::utils::errors::Result;

/// Event persistence operations
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, event: Event) -> Result<Event>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;
    async fn list_active_events(&self) -> Result<Vec<Event>>;
    async fn update_event(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event>;
    async fn set_daily_closure(&self, id: Uuid, date: NaiveDate, closed: bool) -> Result<Event>;
    async fn deactivate_event(&self, id: Uuid) -> Result<Event>;
    async fn count_teams(&self, event_id: Uuid) -> Result<i64>;
}

/// Participant persistence operations
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn insert_registration(
        &self,
        participants: Vec<Participant>,
    ) -> Result<Vec<Participant>>;
    async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>>;
    async fn find_by_ticket_code(&self, code: &TicketCode) -> Result<Option<Participant>>;
    async fn find_by_email(&self, event_id: Uuid, email: &str) -> Result<Option<Participant>>;
    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Participant>>;
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Participant>>;
    async fn find_team_lead(&self, team_id: Uuid) -> Result<Option<Participant>>;
    async fn update_payment(&self, id: Uuid, patch: PaymentPatch) -> Result<Participant>;
    async fn mark_verified(
        &self,
        id: Uuid,
        verification_time: DateTime<Utc>,
        assigned_room: Option<&str>,
    ) -> Result<Participant>;
    async fn count_for_event(&self, event_id: Uuid) -> Result<i64>;
}

/// Verification audit-record persistence operations
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn append_record(&self, record: VerificationRecord) -> Result<VerificationRecord>;
    async fn list_for_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<VerificationRecord>>;
}

/// Partial update applied to a participant's payment fields
///
/// Every field is optional; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub receipt_url: Option<String>,
    pub transaction_id: Option<String>,
}
