//! Services module
//!
//! This module contains business logic services

pub mod checkin;
pub mod events;
pub mod notification;
pub mod payment;
pub mod registration;
pub mod roles;

// Re-export commonly used services
pub use checkin::{CheckinOutcome, CheckinService};
pub use events::EventService;
pub use notification::{
    NoopNotifier, NotificationSender, PaymentNotification, RecordingNotifier, WebhookNotifier,
};
pub use payment::PaymentService;
pub use registration::RegistrationService;
pub use roles::{ConfigRoleResolver, RoleResolver};

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub registration_service: RegistrationService,
    pub payment_service: PaymentService,
    pub checkin_service: CheckinService,
    pub event_service: EventService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings, clock: Arc<dyn Clock>) -> Result<Self> {
        let roles: Arc<dyn RoleResolver> = Arc::new(ConfigRoleResolver::new(&settings.roles));
        let notifier: Arc<dyn NotificationSender> = if settings.notifications.enabled {
            Arc::new(WebhookNotifier::new(&settings.notifications)?)
        } else {
            Arc::new(NoopNotifier)
        };

        Ok(Self::with_collaborators(database, roles, notifier, clock))
    }

    /// Wire the services against explicit collaborators; tests inject the
    /// in-memory store, a manual clock and a recording notifier here
    pub fn with_collaborators(
        database: DatabaseService,
        roles: Arc<dyn RoleResolver>,
        notifier: Arc<dyn NotificationSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registration_service = RegistrationService::new(
            database.events.clone(),
            database.participants.clone(),
            roles.clone(),
            clock.clone(),
        );
        let payment_service = PaymentService::new(
            database.events.clone(),
            database.participants.clone(),
            notifier,
        );
        let checkin_service = CheckinService::new(
            database.participants.clone(),
            database.verifications.clone(),
            roles.clone(),
            clock.clone(),
        );
        let event_service = EventService::new(database.events.clone(), roles, clock);

        Self {
            registration_service,
            payment_service,
            checkin_service,
            event_service,
        }
    }
}
