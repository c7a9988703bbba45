//! Notification service implementation
//!
//! Payment-status notifications are fire-and-forget: a failed dispatch is
//! logged and never blocks the status transition that triggered it. The
//! production sender posts to a configured webhook; tests use the recording
//! sender.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NotificationConfig;
use crate::models::event::Event;
use crate::models::participant::{Participant, PaymentStatus};
use crate::utils::errors::{GenesisError, Result};

/// One payment-status notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub participant_id: uuid::Uuid,
    pub email: String,
    pub full_name: String,
    pub event_name: String,
    pub status: PaymentStatus,
    /// True on the copy sent to a team lead about a member's payment
    pub team_lead_copy: bool,
    pub message: String,
}

impl PaymentNotification {
    /// Build the participant-facing notification for a status
    pub fn for_participant(participant: &Participant, event: &Event, status: PaymentStatus) -> Self {
        Self {
            participant_id: participant.id,
            email: participant.email.clone(),
            full_name: participant.full_name.clone(),
            event_name: event.name.clone(),
            status,
            team_lead_copy: false,
            message: message_for(status, &event.name),
        }
    }

    /// The copy a team lead receives about a member's transition
    pub fn for_team_lead(lead: &Participant, member: &Participant, event: &Event, status: PaymentStatus) -> Self {
        Self {
            participant_id: member.id,
            email: lead.email.clone(),
            full_name: lead.full_name.clone(),
            event_name: event.name.clone(),
            status,
            team_lead_copy: true,
            message: format!(
                "Payment update for your teammate {}: {}",
                member.full_name,
                message_for(status, &event.name)
            ),
        }
    }
}

fn message_for(status: PaymentStatus, event_name: &str) -> String {
    match status {
        PaymentStatus::Paid => format!("Your payment for {} is confirmed. See you there!", event_name),
        PaymentStatus::OfflinePaid => format!(
            "Your offline payment for {} has been recorded. See you there!",
            event_name
        ),
        PaymentStatus::Failed => format!(
            "We could not verify your payment for {}. Please re-upload your receipt from the registration page.",
            event_name
        ),
        PaymentStatus::Pending | PaymentStatus::UnderVerification => {
            format!("Payment update for {}.", event_name)
        }
    }
}

/// Sends payment-status notifications
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn notify_payment_status(&self, notification: PaymentNotification) -> Result<()>;
}

/// Production sender posting each notification to a webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        let webhook_url = config
            .webhook_url
            .clone()
            .ok_or_else(|| GenesisError::Config("notification webhook URL missing".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl NotificationSender for WebhookNotifier {
    async fn notify_payment_status(&self, notification: PaymentNotification) -> Result<()> {
        debug!(
            participant_id = %notification.participant_id,
            status = %notification.status,
            "Posting payment notification"
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&notification)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenesisError::Notification(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        info!(
            participant_id = %notification.participant_id,
            status = %notification.status,
            "Payment notification sent"
        );
        Ok(())
    }
}

/// Sender used when notifications are disabled
pub struct NoopNotifier;

#[async_trait]
impl NotificationSender for NoopNotifier {
    async fn notify_payment_status(&self, notification: PaymentNotification) -> Result<()> {
        debug!(
            participant_id = %notification.participant_id,
            status = %notification.status,
            "Notifications disabled, dropping"
        );
        Ok(())
    }
}

/// Test sender that records everything it is asked to deliver
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<PaymentNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<PaymentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Count of notifications per status, participant copies only
    pub fn participant_counts(&self) -> HashMap<PaymentStatus, usize> {
        let mut counts = HashMap::new();
        for notification in self.sent.lock().unwrap().iter() {
            if !notification.team_lead_copy {
                *counts.entry(notification.status).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn notify_payment_status(&self, notification: PaymentNotification) -> Result<()> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}
