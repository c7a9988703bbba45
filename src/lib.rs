//! Genesis Event Manager
//!
//! Backend core for the Genesis festival registration system. This library
//! provides the registration eligibility engine, participant and team
//! registration workflows, the payment status lifecycle and door check-in,
//! over injectable store, role, clock and notification collaborators.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod eligibility;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GenesisError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use eligibility::{evaluate, RegistrationDecision};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
