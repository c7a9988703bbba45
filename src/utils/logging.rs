//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Genesis application.

use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "genesis.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log a registration decision with structured data
pub fn log_registration_decision(
    event_id: uuid::Uuid,
    email: Option<&str>,
    allowed: bool,
    reason: &str,
) {
    if allowed {
        info!(
            event_id = %event_id,
            email = email,
            reason = reason,
            "Registration allowed"
        );
    } else {
        debug!(
            event_id = %event_id,
            email = email,
            reason = reason,
            "Registration denied"
        );
    }
}

/// Log payment status transitions
pub fn log_payment_transition(participant_id: uuid::Uuid, from: &str, to: &str, actor: &str) {
    info!(
        participant_id = %participant_id,
        from = from,
        to = to,
        actor = actor,
        "Payment status transition"
    );
}

/// Log door check-ins
pub fn log_checkin(participant_id: uuid::Uuid, actor: &str, first_scan: bool) {
    if first_scan {
        info!(
            participant_id = %participant_id,
            actor = actor,
            "Participant checked in"
        );
    } else {
        debug!(
            participant_id = %participant_id,
            actor = actor,
            "Repeat scan for verified participant"
        );
    }
}

/// Log admin actions on events
pub fn log_event_action(event_id: uuid::Uuid, action: &str, actor: &str) {
    warn!(
        event_id = %event_id,
        action = action,
        actor = actor,
        "Admin event action"
    );
}

/// Log notification dispatch failures; these never block the caller
pub fn log_notification_failure(participant_id: uuid::Uuid, error: &str) {
    error!(
        participant_id = %participant_id,
        error = error,
        "Notification dispatch failed"
    );
}
