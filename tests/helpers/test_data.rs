//! Test data helpers for creating events and registration requests

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use Genesis::models::event::{CreateEventRequest, EventDay, PaymentChannel};
use Genesis::models::participant::{
    RegisterParticipantRequest, RegisterTeamRequest, TeamMemberData,
};

/// The festival day used across tests: 2026-02-14
pub fn event_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
}

/// An individual event with a regular window from Feb 1 to Feb 13
pub fn individual_event() -> CreateEventRequest {
    CreateEventRequest {
        name: "Code Sprint".to_string(),
        description: Some("Two-hour speed coding".to_string()),
        date: event_date(),
        event_day: EventDay::Day1,
        entry_fee: 500,
        on_spot_entry_fee: None,
        payment_channel: PaymentChannel::Both,
        on_spot_payment_channel: None,
        is_team_event: false,
        members_per_team: None,
        max_teams: None,
        max_participants: None,
        registration_start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
        registration_start_time: None,
        registration_end_date: NaiveDate::from_ymd_opt(2026, 2, 13),
        registration_end_time: None,
        allow_on_spot_registration: false,
        on_spot_start_time: None,
        on_spot_end_time: None,
        registration_controls: None,
    }
}

/// A team event admitting teams of up to `members_per_team`
pub fn team_event(members_per_team: i32) -> CreateEventRequest {
    CreateEventRequest {
        name: "Robo Soccer".to_string(),
        is_team_event: true,
        members_per_team: Some(members_per_team),
        ..individual_event()
    }
}

/// Regular window already closed, on-the-spot open 08:00-22:00 on the day
pub fn on_spot_event() -> CreateEventRequest {
    CreateEventRequest {
        name: "Treasure Hunt".to_string(),
        registration_end_date: NaiveDate::from_ymd_opt(2026, 2, 13),
        allow_on_spot_registration: true,
        on_spot_start_time: NaiveTime::from_hms_opt(8, 0, 0),
        on_spot_end_time: NaiveTime::from_hms_opt(22, 0, 0),
        on_spot_entry_fee: Some(700),
        ..individual_event()
    }
}

pub fn registration_request(event_id: Uuid, email: &str) -> RegisterParticipantRequest {
    RegisterParticipantRequest {
        event_id,
        full_name: "Asha Verma".to_string(),
        email: email.to_string(),
        phone: "+91 98765 43210".to_string(),
        college: Some("City College".to_string()),
        standard: Some("12".to_string()),
        stream: Some("Science".to_string()),
        payment_method: None,
    }
}

pub fn team_member(email: &str) -> TeamMemberData {
    TeamMemberData {
        full_name: "Ravi Kumar".to_string(),
        email: email.to_string(),
        phone: "+91 91234 56789".to_string(),
        college: Some("City College".to_string()),
        standard: Some("12".to_string()),
        stream: Some("Commerce".to_string()),
    }
}

pub fn team_request(event_id: Uuid, team_name: &str, member_emails: &[&str]) -> RegisterTeamRequest {
    RegisterTeamRequest {
        event_id,
        team_name: team_name.to_string(),
        members: member_emails.iter().map(|email| team_member(email)).collect(),
        payment_method: None,
    }
}
