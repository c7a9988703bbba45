//! Payment service implementation
//!
//! Drives the participant payment lifecycle. Every mutation goes through
//! the central transition table; setting a status the participant already
//! holds is an idempotent no-op and never re-fires notifications.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::store::{EventStore, ParticipantStore, PaymentPatch};
use crate::models::event::Event;
use crate::models::participant::{Participant, PaymentMethod, PaymentStatus};
use crate::services::notification::{NotificationSender, PaymentNotification};
use crate::utils::errors::{GenesisError, Result};
use crate::utils::logging::{log_notification_failure, log_payment_transition};

/// Payment lifecycle workflows over the store seam
#[derive(Clone)]
pub struct PaymentService {
    events: Arc<dyn EventStore>,
    participants: Arc<dyn ParticipantStore>,
    notifier: Arc<dyn NotificationSender>,
}

impl PaymentService {
    pub fn new(
        events: Arc<dyn EventStore>,
        participants: Arc<dyn ParticipantStore>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            events,
            participants,
            notifier,
        }
    }

    /// Transition a participant's payment status
    ///
    /// Repeating a call with the status the participant already holds
    /// succeeds without side effects. A notification fires exactly once per
    /// distinct transition into a settling or failing status, with an extra
    /// copy to the team lead for team members.
    pub async fn update_payment_status(
        &self,
        actor: &str,
        participant_id: Uuid,
        new_status: PaymentStatus,
        method: Option<PaymentMethod>,
        receipt_url: Option<String>,
        transaction_id: Option<String>,
    ) -> Result<Participant> {
        let participant = self
            .participants
            .get_participant(participant_id)
            .await?
            .ok_or(GenesisError::ParticipantNotFound { participant_id })?;

        if participant.payment_status == new_status {
            debug!(
                participant_id = %participant_id,
                status = %new_status,
                "Payment status unchanged, skipping"
            );
            return Ok(participant);
        }

        if !participant.payment_status.can_transition_to(new_status) {
            return Err(GenesisError::InvalidStateTransition {
                from: participant.payment_status.to_string(),
                to: new_status.to_string(),
            });
        }

        if let Some(ref transaction_id) = transaction_id {
            self.ensure_transaction_unclaimed(participant_id, transaction_id)
                .await?;
        }

        let updated = self
            .participants
            .update_payment(
                participant_id,
                PaymentPatch {
                    payment_status: Some(new_status),
                    payment_method: method,
                    receipt_url,
                    transaction_id,
                },
            )
            .await?;

        log_payment_transition(
            participant_id,
            participant.payment_status.as_str(),
            new_status.as_str(),
            actor,
        );

        if new_status.notifies() {
            self.dispatch_notifications(&updated, new_status).await;
        }

        Ok(updated)
    }

    /// Online payment completed by the participant
    pub async fn complete_online_payment(
        &self,
        participant_id: Uuid,
        transaction_id: Option<String>,
    ) -> Result<Participant> {
        self.update_payment_status(
            "participant",
            participant_id,
            PaymentStatus::Paid,
            Some(PaymentMethod::Online),
            None,
            transaction_id,
        )
        .await
    }

    /// Offline payment recorded together with its receipt
    pub async fn complete_offline_payment(
        &self,
        participant_id: Uuid,
        receipt_url: String,
    ) -> Result<Participant> {
        self.update_payment_status(
            "participant",
            participant_id,
            PaymentStatus::OfflinePaid,
            Some(PaymentMethod::Offline),
            Some(receipt_url),
            None,
        )
        .await
    }

    /// Receipt uploaded for review; also the re-upload path after a
    /// rejection
    pub async fn submit_receipt(
        &self,
        participant_id: Uuid,
        receipt_url: String,
    ) -> Result<Participant> {
        self.update_payment_status(
            "participant",
            participant_id,
            PaymentStatus::UnderVerification,
            None,
            Some(receipt_url),
            None,
        )
        .await
    }

    /// Admin confirmed the UPI transaction matches
    pub async fn confirm_payment(
        &self,
        actor: &str,
        participant_id: Uuid,
        transaction_id: Option<String>,
    ) -> Result<Participant> {
        self.update_payment_status(
            actor,
            participant_id,
            PaymentStatus::Paid,
            None,
            None,
            transaction_id,
        )
        .await
    }

    /// Admin rejected the payment evidence
    pub async fn reject_payment(&self, actor: &str, participant_id: Uuid) -> Result<Participant> {
        self.update_payment_status(actor, participant_id, PaymentStatus::Failed, None, None, None)
            .await
    }

    /// Manually attach a transaction id without changing the status
    ///
    /// Rejected when another participant already claims the same id, so one
    /// receipt can never cover two registrations.
    pub async fn attach_transaction_id(
        &self,
        participant_id: Uuid,
        transaction_id: String,
    ) -> Result<Participant> {
        self.participants
            .get_participant(participant_id)
            .await?
            .ok_or(GenesisError::ParticipantNotFound { participant_id })?;

        self.ensure_transaction_unclaimed(participant_id, &transaction_id)
            .await?;

        self.participants
            .update_payment(
                participant_id,
                PaymentPatch {
                    transaction_id: Some(transaction_id),
                    ..PaymentPatch::default()
                },
            )
            .await
    }

    async fn ensure_transaction_unclaimed(
        &self,
        participant_id: Uuid,
        transaction_id: &str,
    ) -> Result<()> {
        // the storage uniqueness constraint is the real guard; this check
        // exists to return the specific error before a write is attempted
        if let Some(holder) = self
            .participants
            .find_by_transaction_id(transaction_id)
            .await?
        {
            if holder.id != participant_id {
                warn!(
                    participant_id = %participant_id,
                    holder_id = %holder.id,
                    "Transaction id already claimed"
                );
                return Err(GenesisError::DuplicateTransactionId {
                    transaction_id: transaction_id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Notify the participant, and the team lead for team members; dispatch
    /// failures are logged and never bubble up
    async fn dispatch_notifications(&self, participant: &Participant, status: PaymentStatus) {
        let event = match self.event_for(participant).await {
            Some(event) => event,
            None => return,
        };

        let notification = PaymentNotification::for_participant(participant, &event, status);
        if let Err(err) = self.notifier.notify_payment_status(notification).await {
            log_notification_failure(participant.id, &err.to_string());
        }

        if let Some(team_id) = participant.team_id {
            match self.participants.find_team_lead(team_id).await {
                Ok(Some(lead)) if lead.id != participant.id => {
                    let copy =
                        PaymentNotification::for_team_lead(&lead, participant, &event, status);
                    if let Err(err) = self.notifier.notify_payment_status(copy).await {
                        log_notification_failure(lead.id, &err.to_string());
                    }
                }
                Ok(_) => {}
                Err(err) => log_notification_failure(participant.id, &err.to_string()),
            }
        }
    }

    async fn event_for(&self, participant: &Participant) -> Option<Event> {
        match self.events.get_event(participant.event_id).await {
            Ok(event) => event,
            Err(err) => {
                log_notification_failure(participant.id, &err.to_string());
                None
            }
        }
    }
}
