//! Event model

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::participant::{PaymentMethod, RegistrationType};
use crate::utils::errors::{GenesisError, Result};

/// Festival day an event takes place on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_day", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventDay {
    Day1,
    Day2,
}

/// Payment channels an event accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_channel", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    Online,
    Offline,
    Both,
}

impl PaymentChannel {
    /// Whether a participant's chosen payment method is accepted by this channel
    pub fn accepts(&self, method: PaymentMethod) -> bool {
        match self {
            PaymentChannel::Online => method == PaymentMethod::Online,
            PaymentChannel::Offline => method == PaymentMethod::Offline,
            PaymentChannel::Both => true,
        }
    }
}

/// Per-event overrides for registration past the configured deadline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationControls {
    pub allow_after_deadline: bool,
    pub allow_after_deadline_for_admins: bool,
    pub allow_after_deadline_for_volunteers: bool,
    pub deadline_override_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Calendar day the event takes place on
    pub date: NaiveDate,
    pub event_day: EventDay,
    /// Regular entry fee in whole rupees
    pub entry_fee: i64,
    /// Fee override for on-the-spot registrations
    pub on_spot_entry_fee: Option<i64>,
    pub payment_channel: PaymentChannel,
    pub on_spot_payment_channel: Option<PaymentChannel>,
    pub is_team_event: bool,
    pub members_per_team: Option<i32>,
    pub max_teams: Option<i32>,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub registration_start_date: Option<NaiveDate>,
    pub registration_start_time: Option<NaiveTime>,
    pub registration_end_date: Option<NaiveDate>,
    pub registration_end_time: Option<NaiveTime>,
    pub allow_on_spot_registration: bool,
    pub on_spot_start_time: Option<NaiveTime>,
    pub on_spot_end_time: Option<NaiveTime>,
    /// Dates on which the regular registration path is explicitly closed
    pub daily_registration_closure: Json<HashMap<NaiveDate, bool>>,
    pub registration_controls: Json<RegistrationControls>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Resolve the entry fee actually charged for a registration type
    pub fn entry_fee_for(&self, registration_type: RegistrationType) -> i64 {
        match registration_type {
            RegistrationType::OnSpot => self.on_spot_entry_fee.unwrap_or(self.entry_fee),
            RegistrationType::Regular => self.entry_fee,
        }
    }

    /// Resolve the payment channel for a registration type
    pub fn payment_channel_for(&self, registration_type: RegistrationType) -> PaymentChannel {
        match registration_type {
            RegistrationType::OnSpot => self
                .on_spot_payment_channel
                .unwrap_or(self.payment_channel),
            RegistrationType::Regular => self.payment_channel,
        }
    }

    /// Whether the regular registration path is explicitly closed on a date
    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        self.daily_registration_closure
            .get(&date)
            .copied()
            .unwrap_or(false)
    }

    /// Whether the event has reached its participant cap
    pub fn is_full(&self) -> bool {
        match self.max_participants {
            Some(max) => self.current_participants >= max,
            None => false,
        }
    }

    /// Validate the registration window invariants
    ///
    /// Start must precede end, and the window must not extend past the
    /// event's own calendar day.
    pub fn validate_windows(&self) -> Result<()> {
        if let Some(end_date) = self.registration_end_date {
            if end_date > self.date {
                return Err(GenesisError::InvalidInput(
                    "registration window must not extend past the event date".to_string(),
                ));
            }
        }
        if let (Some(start), Some(end)) = (self.registration_start_date, self.registration_end_date)
        {
            let start_time = self
                .registration_start_time
                .unwrap_or(NaiveTime::MIN);
            let end_time = self
                .registration_end_time
                .unwrap_or_else(default_end_of_day);
            if start.and_time(start_time) >= end.and_time(end_time) {
                return Err(GenesisError::InvalidInput(
                    "registration window start must precede its end".to_string(),
                ));
            }
        }
        if let (Some(start), Some(end)) = (self.on_spot_start_time, self.on_spot_end_time) {
            if start > end {
                return Err(GenesisError::InvalidInput(
                    "on-the-spot window start must precede its end".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Event {
    /// The event as it would look with a patch applied; absent patch fields
    /// keep their current value
    pub fn merged_with(&self, patch: &UpdateEventRequest) -> Event {
        let mut merged = self.clone();
        if let Some(ref name) = patch.name {
            merged.name = name.clone();
        }
        if let Some(ref description) = patch.description {
            merged.description = Some(description.clone());
        }
        if let Some(date) = patch.date {
            merged.date = date;
        }
        if let Some(entry_fee) = patch.entry_fee {
            merged.entry_fee = entry_fee;
        }
        if let Some(fee) = patch.on_spot_entry_fee {
            merged.on_spot_entry_fee = Some(fee);
        }
        if let Some(date) = patch.registration_start_date {
            merged.registration_start_date = Some(date);
        }
        if let Some(time) = patch.registration_start_time {
            merged.registration_start_time = Some(time);
        }
        if let Some(date) = patch.registration_end_date {
            merged.registration_end_date = Some(date);
        }
        if let Some(time) = patch.registration_end_time {
            merged.registration_end_time = Some(time);
        }
        if let Some(allow) = patch.allow_on_spot_registration {
            merged.allow_on_spot_registration = allow;
        }
        if let Some(time) = patch.on_spot_start_time {
            merged.on_spot_start_time = Some(time);
        }
        if let Some(time) = patch.on_spot_end_time {
            merged.on_spot_end_time = Some(time);
        }
        if let Some(ref controls) = patch.registration_controls {
            merged.registration_controls = Json(controls.clone());
        }
        if let Some(active) = patch.is_active {
            merged.is_active = active;
        }
        merged
    }
}

/// End-of-day default used when a window omits its time half
pub fn default_end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub event_day: EventDay,
    pub entry_fee: i64,
    pub on_spot_entry_fee: Option<i64>,
    pub payment_channel: PaymentChannel,
    pub on_spot_payment_channel: Option<PaymentChannel>,
    pub is_team_event: bool,
    pub members_per_team: Option<i32>,
    pub max_teams: Option<i32>,
    pub max_participants: Option<i32>,
    pub registration_start_date: Option<NaiveDate>,
    pub registration_start_time: Option<NaiveTime>,
    pub registration_end_date: Option<NaiveDate>,
    pub registration_end_time: Option<NaiveTime>,
    pub allow_on_spot_registration: bool,
    pub on_spot_start_time: Option<NaiveTime>,
    pub on_spot_end_time: Option<NaiveTime>,
    pub registration_controls: Option<RegistrationControls>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub entry_fee: Option<i64>,
    pub on_spot_entry_fee: Option<i64>,
    pub registration_start_date: Option<NaiveDate>,
    pub registration_start_time: Option<NaiveTime>,
    pub registration_end_date: Option<NaiveDate>,
    pub registration_end_time: Option<NaiveTime>,
    pub allow_on_spot_registration: Option<bool>,
    pub on_spot_start_time: Option<NaiveTime>,
    pub on_spot_end_time: Option<NaiveTime>,
    pub registration_controls: Option<RegistrationControls>,
    pub is_active: Option<bool>,
}
