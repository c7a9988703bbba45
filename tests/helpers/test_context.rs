//! Test context wiring the services against in-memory collaborators
//!
//! Every test gets the in-memory store, a manual clock pinned to a known
//! instant and a recording notification sender, so all temporal rules and
//! side effects are deterministic and observable.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use Genesis::config::settings::RolesConfig;
use Genesis::database::DatabaseService;
use Genesis::services::{ConfigRoleResolver, RecordingNotifier, ServiceFactory};
use Genesis::utils::clock::ManualClock;

pub const ADMIN_EMAIL: &str = "admin@genesis.events";
pub const VOLUNTEER_EMAIL: &str = "volunteer@genesis.events";

/// The instant every test starts at: 2026-02-01 10:00 UTC
pub fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap()
}

pub struct TestContext {
    pub services: ServiceFactory,
    pub database: DatabaseService,
    pub clock: ManualClock,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub fn new() -> Self {
        let database = DatabaseService::in_memory();
        let clock = ManualClock::new(base_instant());
        let notifier = Arc::new(RecordingNotifier::new());
        let roles = ConfigRoleResolver::new(&RolesConfig {
            admin_emails: vec![ADMIN_EMAIL.to_string()],
            volunteer_emails: vec![VOLUNTEER_EMAIL.to_string()],
        });

        let services = ServiceFactory::with_collaborators(
            database.clone(),
            Arc::new(roles),
            notifier.clone(),
            Arc::new(clock.clone()),
        );

        Self {
            services,
            database,
            clock,
            notifier,
        }
    }

    /// Move the clock to a specific instant
    pub fn set_time(&self, y: i32, m: u32, d: u32, h: u32, min: u32) {
        self.clock
            .set(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap());
    }
}
