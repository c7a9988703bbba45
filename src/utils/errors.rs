//! Error handling for Genesis
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Genesis application
#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: uuid::Uuid },

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: uuid::Uuid },

    #[error("Registration closed: {reason}")]
    RegistrationClosed { reason: String },

    #[error("Event is full: {event_id}")]
    CapacityExhausted { event_id: uuid::Uuid },

    #[error("Invalid payment transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Transaction id already claimed: {transaction_id}")]
    DuplicateTransactionId { transaction_id: String },

    #[error("Team event must be registered through the team flow: {event_id}")]
    TeamEventRequiresTeam { event_id: uuid::Uuid },

    #[error("Not a team event: {event_id}")]
    NotATeamEvent { event_id: uuid::Uuid },

    #[error("Invalid team size: got {got}, allowed 1..={max}")]
    TeamSizeViolation { got: usize, max: u32 },

    #[error("Invalid ticket code")]
    InvalidTicketCode,

    #[error("No participant holds this ticket code")]
    UnknownTicket,

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for Genesis operations
pub type Result<T> = std::result::Result<T, GenesisError>;

impl GenesisError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GenesisError::Database(_) => false,
            GenesisError::Migration(_) => false,
            GenesisError::Config(_) => false,
            GenesisError::PermissionDenied(_) => false,
            GenesisError::EventNotFound { .. } => false,
            GenesisError::ParticipantNotFound { .. } => false,
            GenesisError::RegistrationClosed { .. } => false,
            GenesisError::CapacityExhausted { .. } => false,
            GenesisError::InvalidStateTransition { .. } => false,
            GenesisError::DuplicateTransactionId { .. } => false,
            GenesisError::TeamEventRequiresTeam { .. } => false,
            GenesisError::NotATeamEvent { .. } => false,
            GenesisError::TeamSizeViolation { .. } => false,
            GenesisError::InvalidTicketCode => false,
            GenesisError::UnknownTicket => false,
            GenesisError::Notification(_) => true,
            GenesisError::Http(_) => true,
            GenesisError::Serialization(_) => false,
            GenesisError::Io(_) => true,
            GenesisError::InvalidInput(_) => false,
            GenesisError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GenesisError::Database(_) => ErrorSeverity::Critical,
            GenesisError::Migration(_) => ErrorSeverity::Critical,
            GenesisError::Config(_) => ErrorSeverity::Critical,
            GenesisError::PermissionDenied(_) => ErrorSeverity::Warning,
            GenesisError::RegistrationClosed { .. } => ErrorSeverity::Info,
            GenesisError::CapacityExhausted { .. } => ErrorSeverity::Info,
            GenesisError::DuplicateTransactionId { .. } => ErrorSeverity::Warning,
            GenesisError::InvalidTicketCode => ErrorSeverity::Info,
            GenesisError::UnknownTicket => ErrorSeverity::Info,
            GenesisError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
