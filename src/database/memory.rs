//! In-memory store backend
//!
//! Backs the integration test suite and local runs without Postgres. One
//! lock guards all state, which gives registration inserts the same
//! all-or-nothing semantics and counter guarantees as the transactional
//! Postgres path: constraints are checked for every row before anything
//! is applied.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::database::store::{
    EventStore, ParticipantStore, PaymentPatch, VerificationStore,
};
use crate::models::event::{Event, UpdateEventRequest};
use crate::models::participant::Participant;
use crate::models::ticket::TicketCode;
use crate::models::verification::VerificationRecord;
use crate::utils::errors::{GenesisError, Result};

#[derive(Debug, Default)]
struct MemoryState {
    events: HashMap<Uuid, Event>,
    participants: HashMap<Uuid, Participant>,
    verifications: Vec<VerificationRecord>,
}

/// Shared in-memory store implementing every store trait
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(&self, event: Event) -> Result<Event> {
        let mut state = self.state.lock().unwrap();
        state.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let state = self.state.lock().unwrap();
        Ok(state.events.get(&id).cloned())
    }

    async fn list_active_events(&self) -> Result<Vec<Event>> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| event.is_active)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        Ok(events)
    }

    async fn update_event(&self, id: Uuid, patch: UpdateEventRequest) -> Result<Event> {
        let mut state = self.state.lock().unwrap();
        let event = state
            .events
            .get_mut(&id)
            .ok_or(GenesisError::EventNotFound { event_id: id })?;

        let mut merged = event.merged_with(&patch);
        merged.updated_at = Utc::now();
        *event = merged.clone();

        Ok(merged)
    }

    async fn set_daily_closure(&self, id: Uuid, date: NaiveDate, closed: bool) -> Result<Event> {
        let mut state = self.state.lock().unwrap();
        let event = state
            .events
            .get_mut(&id)
            .ok_or(GenesisError::EventNotFound { event_id: id })?;
        event.daily_registration_closure.0.insert(date, closed);
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn deactivate_event(&self, id: Uuid) -> Result<Event> {
        let mut state = self.state.lock().unwrap();
        let event = state
            .events
            .get_mut(&id)
            .ok_or(GenesisError::EventNotFound { event_id: id })?;
        event.is_active = false;
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn count_teams(&self, event_id: Uuid) -> Result<i64> {
        let state = self.state.lock().unwrap();
        let teams: std::collections::HashSet<Uuid> = state
            .participants
            .values()
            .filter(|p| p.event_id == event_id)
            .filter_map(|p| p.team_id)
            .collect();
        Ok(teams.len() as i64)
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn insert_registration(&self, participants: Vec<Participant>) -> Result<Vec<Participant>> {
        let event_id = match participants.first() {
            Some(first) => first.event_id,
            None => return Ok(vec![]),
        };
        let delta = participants.len() as i32;

        let mut state = self.state.lock().unwrap();

        // capacity guard, mirroring the SQL transaction
        {
            let event = state
                .events
                .get(&event_id)
                .filter(|event| event.is_active)
                .ok_or(GenesisError::CapacityExhausted { event_id })?;
            if let Some(max) = event.max_participants {
                if event.current_participants + delta > max {
                    return Err(GenesisError::CapacityExhausted { event_id });
                }
            }
        }

        // validate every row against the uniqueness constraints before
        // applying any of them
        for candidate in &participants {
            let email_taken = state.participants.values().any(|existing| {
                existing.event_id == candidate.event_id && existing.email == candidate.email
            });
            if email_taken {
                return Err(GenesisError::InvalidInput(format!(
                    "{} is already registered for this event",
                    candidate.email
                )));
            }
            let code_taken = state
                .participants
                .values()
                .any(|existing| existing.ticket_code == candidate.ticket_code);
            if code_taken {
                return Err(GenesisError::InvalidInput(
                    "ticket code collision".to_string(),
                ));
            }
        }

        for participant in &participants {
            state
                .participants
                .insert(participant.id, participant.clone());
        }
        if let Some(event) = state.events.get_mut(&event_id) {
            event.current_participants += delta;
            event.updated_at = Utc::now();
        }

        Ok(participants)
    }

    async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>> {
        let state = self.state.lock().unwrap();
        Ok(state.participants.get(&id).cloned())
    }

    async fn find_by_ticket_code(&self, code: &TicketCode) -> Result<Option<Participant>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .participants
            .values()
            .find(|p| &p.ticket_code == code)
            .cloned())
    }

    async fn find_by_email(&self, event_id: Uuid, email: &str) -> Result<Option<Participant>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .participants
            .values()
            .find(|p| p.event_id == event_id && p.email == email)
            .cloned())
    }

    async fn find_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Participant>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .participants
            .values()
            .find(|p| p.transaction_id.as_deref() == Some(transaction_id))
            .cloned())
    }

    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Participant>> {
        let state = self.state.lock().unwrap();
        let mut participants: Vec<Participant> = state
            .participants
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect();
        participants.sort_by_key(|p| p.registered_at);
        Ok(participants)
    }

    async fn find_team_lead(&self, team_id: Uuid) -> Result<Option<Participant>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .participants
            .values()
            .find(|p| p.team_id == Some(team_id) && p.is_team_lead)
            .cloned())
    }

    async fn update_payment(&self, id: Uuid, patch: PaymentPatch) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();

        // uniqueness constraint on transaction_id, as the database enforces
        if let Some(ref transaction_id) = patch.transaction_id {
            let held_elsewhere = state.participants.values().any(|existing| {
                existing.id != id && existing.transaction_id.as_deref() == Some(transaction_id)
            });
            if held_elsewhere {
                return Err(GenesisError::DuplicateTransactionId {
                    transaction_id: transaction_id.clone(),
                });
            }
        }

        let participant = state
            .participants
            .get_mut(&id)
            .ok_or(GenesisError::ParticipantNotFound { participant_id: id })?;

        if let Some(status) = patch.payment_status {
            participant.payment_status = status;
        }
        if let Some(method) = patch.payment_method {
            participant.payment_method = Some(method);
        }
        if let Some(receipt_url) = patch.receipt_url {
            participant.receipt_url = Some(receipt_url);
        }
        if let Some(transaction_id) = patch.transaction_id {
            participant.transaction_id = Some(transaction_id);
        }
        participant.updated_at = Utc::now();

        Ok(participant.clone())
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        verification_time: DateTime<Utc>,
        assigned_room: Option<&str>,
    ) -> Result<Participant> {
        let mut state = self.state.lock().unwrap();
        let participant = state
            .participants
            .get_mut(&id)
            .ok_or(GenesisError::ParticipantNotFound { participant_id: id })?;

        participant.is_verified = true;
        if participant.verification_time.is_none() {
            participant.verification_time = Some(verification_time);
        }
        if let Some(room) = assigned_room {
            participant.assigned_room = Some(room.to_string());
        }
        participant.updated_at = Utc::now();

        Ok(participant.clone())
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .participants
            .values()
            .filter(|p| p.event_id == event_id)
            .count() as i64)
    }
}

#[async_trait]
impl VerificationStore for MemoryStore {
    async fn append_record(&self, record: VerificationRecord) -> Result<VerificationRecord> {
        let mut state = self.state.lock().unwrap();
        state.verifications.push(record.clone());
        Ok(record)
    }

    async fn list_for_participant(&self, participant_id: Uuid) -> Result<Vec<VerificationRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .verifications
            .iter()
            .filter(|record| record.participant_id == participant_id)
            .cloned()
            .collect())
    }
}
