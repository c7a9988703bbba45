//! Roles and their permission table

use serde::{Deserialize, Serialize};

/// Role a user acts under, resolved from their email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Volunteer,
    Participant,
}

/// What a role is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    /// May register regardless of any window or closure
    pub can_override_deadlines: bool,
    /// May register participants offline, even past deadlines
    pub can_register_offline: bool,
    /// May perform door check-ins
    pub can_verify_participants: bool,
    pub can_manage_events: bool,
}

impl Role {
    /// Permission table keyed by role
    pub fn permissions(&self) -> RolePermissions {
        match self {
            Role::Admin => RolePermissions {
                can_override_deadlines: true,
                can_register_offline: true,
                can_verify_participants: true,
                can_manage_events: true,
            },
            Role::Volunteer => RolePermissions {
                can_override_deadlines: false,
                can_register_offline: true,
                can_verify_participants: true,
                can_manage_events: false,
            },
            Role::Participant => RolePermissions {
                can_override_deadlines: false,
                can_register_offline: false,
                can_verify_participants: false,
                can_manage_events: false,
            },
        }
    }
}
