//! Registration eligibility engine
//!
//! The single authoritative decision function for whether a user may
//! register for an event at a given instant. Both the eligibility HTTP
//! endpoint and the registration write path call [`evaluate`], so a
//! preview can never disagree with the outcome at write time.

use chrono::{DateTime, Utc};

use crate::eligibility::window::{
    format_time_remaining, on_spot_available, regular_availability, regular_opens_at,
    RegularAvailability,
};
use crate::models::event::Event;
use crate::models::participant::RegistrationType;
use crate::models::role::Role;

/// Outcome of an eligibility evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDecision {
    pub allowed: bool,
    /// Which path admits the user, when allowed
    pub registration_type: Option<RegistrationType>,
    pub reason: String,
    /// Present only when registration has not started yet
    pub time_remaining: Option<String>,
}

impl RegistrationDecision {
    fn allow(registration_type: RegistrationType, reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            registration_type: Some(registration_type),
            reason: reason.into(),
            time_remaining: None,
        }
    }

    fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            registration_type: None,
            reason: reason.into(),
            time_remaining: None,
        }
    }
}

/// Decide whether a user may register for an event right now
///
/// Decision order, first match wins:
/// 1. anonymous users are turned away;
/// 2. deadline-override roles are always admitted;
/// 3. inactive events admit nobody;
/// 4. an open regular window admits;
/// 5. an open on-the-spot window admits at on-the-spot pricing;
/// 6. past the deadline, the event's registration controls may readmit
///    specific roles;
/// 7. offline-registration roles are admitted regardless of window;
/// 8. otherwise denied with the specific closure reason.
pub fn evaluate(
    event: &Event,
    email: Option<&str>,
    role: Role,
    now: DateTime<Utc>,
) -> RegistrationDecision {
    if email.is_none() {
        return RegistrationDecision::deny("sign in to register");
    }

    let permissions = role.permissions();
    if permissions.can_override_deadlines {
        return RegistrationDecision::allow(
            RegistrationType::Regular,
            "registration deadlines do not apply to this account",
        );
    }

    if !event.is_active {
        return RegistrationDecision::deny("this event is no longer active");
    }

    let availability = regular_availability(event, now);
    if availability == RegularAvailability::Open {
        return RegistrationDecision::allow(RegistrationType::Regular, "registration is open");
    }

    if on_spot_available(event, now) {
        return RegistrationDecision::allow(
            RegistrationType::OnSpot,
            "on-the-spot registration available",
        );
    }

    if availability == RegularAvailability::Ended {
        let controls = &event.registration_controls.0;
        let readmitted = controls.allow_after_deadline
            || (role == Role::Admin && controls.allow_after_deadline_for_admins)
            || (role == Role::Volunteer && controls.allow_after_deadline_for_volunteers);
        if readmitted {
            let reason = controls
                .deadline_override_reason
                .clone()
                .unwrap_or_else(|| "registration reopened past the deadline".to_string());
            return RegistrationDecision::allow(RegistrationType::Regular, reason);
        }
    }

    if permissions.can_register_offline {
        return RegistrationDecision::allow(
            RegistrationType::Regular,
            "offline registration by volunteer",
        );
    }

    match availability {
        RegularAvailability::NotStarted => {
            let mut decision = RegistrationDecision::deny("registration has not started yet");
            if let Some(opens_at) = regular_opens_at(event) {
                let remaining = opens_at - now.naive_utc();
                decision.time_remaining = Some(format_time_remaining(remaining));
            }
            decision
        }
        RegularAvailability::Ended => RegistrationDecision::deny("registration deadline has passed"),
        RegularAvailability::ClosedToday => {
            RegistrationDecision::deny("registration is closed for today")
        }
        // unreachable in practice: Open was handled above
        RegularAvailability::Open => RegistrationDecision::allow(
            RegistrationType::Regular,
            "registration is open",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{EventDay, PaymentChannel, RegistrationControls};
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use sqlx::types::Json;
    use std::collections::HashMap;
    use uuid::Uuid;

    const USER: Option<&str> = Some("attendee@example.com");

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn event_on(date: NaiveDate) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Hack Night".to_string(),
            description: None,
            date,
            event_day: EventDay::Day2,
            entry_fee: 500,
            on_spot_entry_fee: None,
            payment_channel: PaymentChannel::Both,
            on_spot_payment_channel: None,
            is_team_event: false,
            members_per_team: None,
            max_teams: None,
            max_participants: None,
            current_participants: 0,
            registration_start_date: None,
            registration_start_time: None,
            registration_end_date: None,
            registration_end_time: None,
            allow_on_spot_registration: false,
            on_spot_start_time: None,
            on_spot_end_time: None,
            daily_registration_closure: Json(HashMap::new()),
            registration_controls: Json(RegistrationControls::default()),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_rejected() {
        let event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        let decision = evaluate(&event, None, Role::Participant, at(2026, 2, 1, 12, 0));
        assert!(!decision.allowed);
        assert!(decision.reason.contains("sign in"));
    }

    #[test]
    fn test_admin_overrides_everything() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.is_active = false;
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let decision = evaluate(
            &event,
            Some("admin@genesis.events"),
            Role::Admin,
            at(2026, 2, 20, 12, 0),
        );
        assert!(decision.allowed);
        assert_eq!(decision.registration_type, Some(RegistrationType::Regular));
    }

    #[test]
    fn test_inactive_event_rejected() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.is_active = false;
        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 1, 12, 0));
        assert!(!decision.allowed);
        assert!(decision.reason.contains("no longer active"));
    }

    #[test]
    fn test_open_window_admits_regular() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_start_date = Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 5, 12, 0));
        assert!(decision.allowed);
        assert_eq!(decision.registration_type, Some(RegistrationType::Regular));
    }

    #[test]
    fn test_not_started_reports_time_remaining() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_start_date = Some(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        event.registration_start_time = NaiveTime::from_hms_opt(9, 0, 0);

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 1, 6, 0));
        assert!(!decision.allowed);
        assert!(decision.reason.contains("not started"));
        assert_eq!(decision.time_remaining.as_deref(), Some("2 days, 3 hours"));
    }

    #[test]
    fn test_deadline_passed_rejected() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 12, 12, 0));
        assert!(!decision.allowed);
        assert!(decision.reason.contains("deadline has passed"));
        assert!(decision.time_remaining.is_none());
    }

    #[test]
    fn test_closure_with_on_spot_still_offers_on_spot() {
        // daily closure suppresses only the regular path
        let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let mut event = event_on(today);
        event.daily_registration_closure.0.insert(today, true);
        event.allow_on_spot_registration = true;

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 14, 10, 0));
        assert!(decision.allowed);
        assert_eq!(decision.registration_type, Some(RegistrationType::OnSpot));
        assert!(decision.reason.contains("on-the-spot"));
    }

    #[test]
    fn test_closure_without_on_spot_rejects() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.daily_registration_closure.0.insert(today, true);

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 10, 10, 0));
        assert!(!decision.allowed);
        assert!(decision.reason.contains("closed for today"));
    }

    #[test]
    fn test_on_spot_scenario_end_to_end() {
        // deadline yesterday, on-the-spot 08:00-22:00 on the event day
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());
        event.allow_on_spot_registration = true;
        event.on_spot_start_time = NaiveTime::from_hms_opt(8, 0, 0);
        event.on_spot_end_time = NaiveTime::from_hms_opt(22, 0, 0);
        event.on_spot_entry_fee = Some(700);

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 14, 10, 0));
        assert!(decision.allowed);
        assert_eq!(decision.registration_type, Some(RegistrationType::OnSpot));
        assert_eq!(event.entry_fee_for(RegistrationType::OnSpot), 700);

        // outside the minute window the deadline denial applies again
        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 14, 23, 0));
        assert!(!decision.allowed);
    }

    #[test]
    fn test_deadline_controls_readmit_everyone() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        event.registration_controls.0.allow_after_deadline = true;
        event.registration_controls.0.deadline_override_reason =
            Some("extended by the organizing committee".to_string());

        let decision = evaluate(&event, USER, Role::Participant, at(2026, 2, 12, 12, 0));
        assert!(decision.allowed);
        assert_eq!(decision.reason, "extended by the organizing committee");
    }

    #[test]
    fn test_deadline_controls_scoped_to_role() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.registration_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        event
            .registration_controls
            .0
            .allow_after_deadline_for_volunteers = true;

        let now = at(2026, 2, 12, 12, 0);
        let volunteer = evaluate(&event, Some("vol@genesis.events"), Role::Volunteer, now);
        assert!(volunteer.allowed);
        assert_eq!(volunteer.registration_type, Some(RegistrationType::Regular));

        let participant = evaluate(&event, USER, Role::Participant, now);
        assert!(!participant.allowed);
    }

    #[test]
    fn test_volunteer_offline_fallback() {
        // closed for today, no on-spot, no controls: volunteers still get in
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        event.daily_registration_closure.0.insert(today, true);

        let now = at(2026, 2, 10, 10, 0);
        let volunteer = evaluate(&event, Some("vol@genesis.events"), Role::Volunteer, now);
        assert!(volunteer.allowed);
        assert!(volunteer.reason.contains("offline"));

        let participant = evaluate(&event, USER, Role::Participant, now);
        assert!(!participant.allowed);
    }
}
