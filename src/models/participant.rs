//! Participant model and payment lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ticket::TicketCode;

/// Payment lifecycle of a participant
///
/// Transitions are validated centrally through [`PaymentStatus::can_transition_to`];
/// services must never mutate the status outside that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    UnderVerification,
    Paid,
    OfflinePaid,
    Failed,
}

impl PaymentStatus {
    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (*self, next),
            (Pending, Paid)
                | (Pending, OfflinePaid)
                | (Pending, UnderVerification)
                | (Pending, Failed)
                | (UnderVerification, Paid)
                | (UnderVerification, Failed)
                | (Failed, UnderVerification)
        )
    }

    /// Whether entering this status notifies the participant
    pub fn notifies(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Paid | PaymentStatus::OfflinePaid | PaymentStatus::Failed
        )
    }

    /// Whether the payment has settled and no further transitions apply
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::OfflinePaid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::UnderVerification => "under_verification",
            PaymentStatus::Paid => "paid",
            PaymentStatus::OfflinePaid => "offline_paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a participant chose to pay, once chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Online,
    Offline,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::Offline => "offline",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which registration path admitted the participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    Regular,
    OnSpot,
}

impl RegistrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationType::Regular => "regular",
            RegistrationType::OnSpot => "on_spot",
        }
    }
}

impl std::fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: Option<String>,
    pub standard: Option<String>,
    pub stream: Option<String>,
    /// Opaque ticket credential presented at check-in
    pub ticket_code: TicketCode,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub receipt_url: Option<String>,
    pub transaction_id: Option<String>,
    pub registration_type: RegistrationType,
    /// Fee actually charged, which may differ from the event's regular fee
    pub entry_fee_paid: i64,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
    pub is_team_lead: bool,
    pub is_verified: bool,
    pub verification_time: Option<DateTime<Utc>>,
    pub assigned_room: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    /// Whether this participant registered as part of a team
    pub fn is_team_member(&self) -> bool {
        self.team_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub event_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: Option<String>,
    pub standard: Option<String>,
    pub stream: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

/// One member of a team registration; team-level fields live on the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: Option<String>,
    pub standard: Option<String>,
    pub stream: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTeamRequest {
    pub event_id: Uuid,
    pub team_name: String,
    pub members: Vec<TeamMemberData>,
    pub payment_method: Option<PaymentMethod>,
}
