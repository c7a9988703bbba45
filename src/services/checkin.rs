//! Check-in service implementation
//!
//! Resolves a scanned ticket code to its participant and marks them
//! verified. Verification is monotonic: the first scan stamps the time,
//! every later scan is a no-op success. Each scan appends one audit record
//! either way.

use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::{ParticipantStore, VerificationStore};
use crate::models::participant::Participant;
use crate::models::ticket::TicketCode;
use crate::models::verification::VerificationRecord;
use crate::services::roles::RoleResolver;
use crate::utils::clock::Clock;
use crate::utils::errors::{GenesisError, Result};
use crate::utils::logging::log_checkin;

/// Outcome of a door scan
#[derive(Debug, Clone)]
pub struct CheckinOutcome {
    pub participant: Participant,
    /// False when the participant was already verified
    pub first_scan: bool,
}

/// Door check-in workflows over the store seam
#[derive(Clone)]
pub struct CheckinService {
    participants: Arc<dyn ParticipantStore>,
    verifications: Arc<dyn VerificationStore>,
    roles: Arc<dyn RoleResolver>,
    clock: Arc<dyn Clock>,
}

impl CheckinService {
    pub fn new(
        participants: Arc<dyn ParticipantStore>,
        verifications: Arc<dyn VerificationStore>,
        roles: Arc<dyn RoleResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            verifications,
            roles,
            clock,
        }
    }

    /// Verify a participant from a scanned code
    ///
    /// The raw string is validated against the exact ticket shape before
    /// any storage lookup, so garbage scans never hit the store.
    pub async fn verify_by_code(
        &self,
        raw_code: &str,
        actor_email: &str,
        assigned_room: Option<&str>,
    ) -> Result<CheckinOutcome> {
        self.require_verifier(actor_email)?;

        let code = TicketCode::parse(raw_code)?;
        let participant = self
            .participants
            .find_by_ticket_code(&code)
            .await?
            .ok_or(GenesisError::UnknownTicket)?;

        self.verify(participant, actor_email, assigned_room).await
    }

    /// Verify a participant by id, for desk corrections where the code is
    /// already resolved
    pub async fn verify_participant(
        &self,
        participant_id: Uuid,
        actor_email: &str,
        assigned_room: Option<&str>,
    ) -> Result<CheckinOutcome> {
        self.require_verifier(actor_email)?;

        let participant = self
            .participants
            .get_participant(participant_id)
            .await?
            .ok_or(GenesisError::ParticipantNotFound { participant_id })?;

        self.verify(participant, actor_email, assigned_room).await
    }

    /// Audit trail for one participant
    pub async fn verification_history(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<VerificationRecord>> {
        self.verifications.list_for_participant(participant_id).await
    }

    async fn verify(
        &self,
        participant: Participant,
        actor_email: &str,
        assigned_room: Option<&str>,
    ) -> Result<CheckinOutcome> {
        let first_scan = !participant.is_verified;
        let now = self.clock.now();

        let updated = self
            .participants
            .mark_verified(participant.id, now, assigned_room)
            .await?;

        self.verifications
            .append_record(VerificationRecord::new(participant.id, actor_email, now))
            .await?;

        log_checkin(participant.id, actor_email, first_scan);
        Ok(CheckinOutcome {
            participant: updated,
            first_scan,
        })
    }

    fn require_verifier(&self, actor_email: &str) -> Result<()> {
        let role = self.roles.resolve(actor_email);
        if !role.permissions().can_verify_participants {
            return Err(GenesisError::PermissionDenied(format!(
                "{} may not verify participants",
                actor_email
            )));
        }
        Ok(())
    }
}
