//! Database module
//!
//! This module handles database connections and store implementations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabaseConfig, DatabasePool};
pub use memory::MemoryStore;
pub use repositories::{EventRepository, ParticipantRepository, VerificationRepository};
pub use service::DatabaseService;
pub use store::{EventStore, ParticipantStore, PaymentPatch, VerificationStore};
