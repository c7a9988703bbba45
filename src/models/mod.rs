//! Data models

pub mod event;
pub mod participant;
pub mod role;
pub mod ticket;
pub mod verification;

pub use event::{
    CreateEventRequest, Event, EventDay, PaymentChannel, RegistrationControls, UpdateEventRequest,
};
pub use participant::{
    Participant, PaymentMethod, PaymentStatus, RegisterParticipantRequest, RegisterTeamRequest,
    RegistrationType, TeamMemberData,
};
pub use role::{Role, RolePermissions};
pub use ticket::TicketCode;
pub use verification::VerificationRecord;
