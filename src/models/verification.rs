//! Check-in audit records
//!
//! Every scan appends one record, including re-scans of an already verified
//! participant; only the first scan flips the participant's verified flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub participant_id: Uuid,
    /// Volunteer or admin who performed the scan
    pub actor: String,
    pub recorded_at: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn new(participant_id: Uuid, actor: &str, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant_id,
            actor: actor.to_string(),
            recorded_at,
        }
    }
}
