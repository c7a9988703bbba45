//! Event administration service
//!
//! Admin-facing event lifecycle: creation, edits, daily closure toggles and
//! soft deletion. Window invariants are validated before anything is
//! persisted.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::store::EventStore;
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::services::roles::RoleResolver;
use crate::utils::clock::Clock;
use crate::utils::errors::{GenesisError, Result};
use crate::utils::logging::log_event_action;

/// Event management workflows over the store seam
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    roles: Arc<dyn RoleResolver>,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventStore>,
        roles: Arc<dyn RoleResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            roles,
            clock,
        }
    }

    /// Create a new event
    pub async fn create_event(
        &self,
        actor_email: &str,
        request: CreateEventRequest,
    ) -> Result<Event> {
        self.require_manager(actor_email)?;

        let now = self.clock.now();
        let event = Event {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            date: request.date,
            event_day: request.event_day,
            entry_fee: request.entry_fee,
            on_spot_entry_fee: request.on_spot_entry_fee,
            payment_channel: request.payment_channel,
            on_spot_payment_channel: request.on_spot_payment_channel,
            is_team_event: request.is_team_event,
            members_per_team: request.members_per_team,
            max_teams: request.max_teams,
            max_participants: request.max_participants,
            current_participants: 0,
            registration_start_date: request.registration_start_date,
            registration_start_time: request.registration_start_time,
            registration_end_date: request.registration_end_date,
            registration_end_time: request.registration_end_time,
            allow_on_spot_registration: request.allow_on_spot_registration,
            on_spot_start_time: request.on_spot_start_time,
            on_spot_end_time: request.on_spot_end_time,
            daily_registration_closure: Json(Default::default()),
            registration_controls: Json(request.registration_controls.unwrap_or_default()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        event.validate_windows()?;

        let created = self.events.create_event(event).await?;
        log_event_action(created.id, "create", actor_email);
        Ok(created)
    }

    /// Edit an event, validating the windows the patch would produce
    pub async fn update_event(
        &self,
        actor_email: &str,
        event_id: Uuid,
        patch: UpdateEventRequest,
    ) -> Result<Event> {
        self.require_manager(actor_email)?;

        let existing = self
            .events
            .get_event(event_id)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id })?;
        existing.merged_with(&patch).validate_windows()?;

        let updated = self.events.update_event(event_id, patch).await?;
        log_event_action(event_id, "update", actor_email);
        Ok(updated)
    }

    /// Close or reopen the regular registration path for one date
    pub async fn toggle_daily_closure(
        &self,
        actor_email: &str,
        event_id: Uuid,
        date: NaiveDate,
        closed: bool,
    ) -> Result<Event> {
        self.require_manager(actor_email)?;

        let event = self.events.set_daily_closure(event_id, date, closed).await?;
        log_event_action(
            event_id,
            if closed { "close_day" } else { "reopen_day" },
            actor_email,
        );
        Ok(event)
    }

    /// Soft-delete an event
    pub async fn deactivate_event(&self, actor_email: &str, event_id: Uuid) -> Result<Event> {
        self.require_manager(actor_email)?;

        let event = self.events.deactivate_event(event_id).await?;
        log_event_action(event_id, "deactivate", actor_email);
        Ok(event)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.events
            .get_event(event_id)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id })
    }

    pub async fn list_active_events(&self) -> Result<Vec<Event>> {
        self.events.list_active_events().await
    }

    fn require_manager(&self, actor_email: &str) -> Result<()> {
        let role = self.roles.resolve(actor_email);
        if !role.permissions().can_manage_events {
            return Err(GenesisError::PermissionDenied(format!(
                "{} may not manage events",
                actor_email
            )));
        }
        Ok(())
    }
}
