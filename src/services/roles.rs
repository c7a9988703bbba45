//! Role resolution service
//!
//! Maps a signed-in email to a role. The allow-lists come from deployment
//! configuration, never from compiled-in constants, so every environment
//! carries its own admin and volunteer rosters.

use std::collections::HashSet;

use crate::config::RolesConfig;
use crate::models::role::Role;

/// Resolves the role a user acts under
pub trait RoleResolver: Send + Sync {
    fn resolve(&self, email: &str) -> Role;
}

/// Allow-list resolver backed by [`RolesConfig`]
#[derive(Debug, Clone)]
pub struct ConfigRoleResolver {
    admins: HashSet<String>,
    volunteers: HashSet<String>,
}

impl ConfigRoleResolver {
    pub fn new(config: &RolesConfig) -> Self {
        Self {
            admins: config
                .admin_emails
                .iter()
                .map(|email| email.to_lowercase())
                .collect(),
            volunteers: config
                .volunteer_emails
                .iter()
                .map(|email| email.to_lowercase())
                .collect(),
        }
    }
}

impl RoleResolver for ConfigRoleResolver {
    fn resolve(&self, email: &str) -> Role {
        let email = email.to_lowercase();
        if self.admins.contains(&email) {
            Role::Admin
        } else if self.volunteers.contains(&email) {
            Role::Volunteer
        } else {
            Role::Participant
        }
    }
}
