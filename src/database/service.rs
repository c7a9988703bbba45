//! Database service layer
//!
//! Bundles the repositories behind one constructor so callers wire a single
//! object per backend.

use std::sync::Arc;

use crate::database::connection::DatabasePool;
use crate::database::memory::MemoryStore;
use crate::database::repositories::{
    EventRepository, ParticipantRepository, VerificationRepository,
};
use crate::database::store::{EventStore, ParticipantStore, VerificationStore};

/// Handles to the three store seams
#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventStore>,
    pub participants: Arc<dyn ParticipantStore>,
    pub verifications: Arc<dyn VerificationStore>,
}

impl DatabaseService {
    /// Postgres-backed stores sharing one pool
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: Arc::new(EventRepository::new(pool.clone())),
            participants: Arc::new(ParticipantRepository::new(pool.clone())),
            verifications: Arc::new(VerificationRepository::new(pool)),
        }
    }

    /// In-memory stores for tests and local runs
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            events: store.clone(),
            participants: store.clone(),
            verifications: store,
        }
    }
}
