//! Registration workflow integration tests

mod helpers;

use assert_matches::assert_matches;

use helpers::test_context::{base_instant, TestContext, ADMIN_EMAIL, VOLUNTEER_EMAIL};
use helpers::test_data::{
    individual_event, on_spot_event, registration_request, team_event, team_request,
};
use Genesis::models::participant::{PaymentStatus, RegistrationType};
use Genesis::utils::errors::GenesisError;
use Genesis::utils::Clock;

#[tokio::test]
async fn registration_creates_pending_participant_with_ticket() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    let participant = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "asha@example.com"))
        .await
        .unwrap();

    assert_eq!(participant.payment_status, PaymentStatus::Pending);
    assert_eq!(participant.registration_type, RegistrationType::Regular);
    assert_eq!(participant.entry_fee_paid, 500);
    assert!(participant.ticket_code.as_str().starts_with("GENESIS:1.0:"));
    assert!(!participant.is_verified);

    let stored = ctx
        .services
        .event_service
        .get_event(event.id)
        .await
        .unwrap();
    assert_eq!(stored.current_participants, 1);
}

#[tokio::test]
async fn registering_for_missing_event_is_hard_error() {
    let ctx = TestContext::new();
    let result = ctx
        .services
        .registration_service
        .register_participant(
            None,
            registration_request(uuid::Uuid::new_v4(), "asha@example.com"),
        )
        .await;
    assert_matches!(result, Err(GenesisError::EventNotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    ctx.services
        .registration_service
        .register_participant(None, registration_request(event.id, "asha@example.com"))
        .await
        .unwrap();

    let result = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "asha@example.com"))
        .await;
    assert_matches!(result, Err(GenesisError::InvalidInput(_)));
}

#[tokio::test]
async fn closed_window_rejects_with_reason() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    ctx.set_time(2026, 2, 14, 9, 0); // past the Feb 13 deadline
    let result = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "late@example.com"))
        .await;

    match result {
        Err(GenesisError::RegistrationClosed { reason }) => {
            assert!(reason.contains("deadline has passed"), "got: {reason}");
        }
        other => panic!("expected RegistrationClosed, got {other:?}"),
    }
}

#[tokio::test]
async fn eligibility_window_boundaries() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    // inside: first and last instant of the window
    for (d, h, min) in [(1, 0, 0), (13, 23, 59)] {
        ctx.set_time(2026, 2, d, h, min);
        let decision = ctx
            .services
            .registration_service
            .check_eligibility(event.id, Some("user@example.com"))
            .await
            .unwrap();
        assert!(decision.allowed, "expected open at Feb {d} {h}:{min}");
    }

    // immediately outside on both sides
    ctx.set_time(2026, 1, 31, 23, 59);
    let before = ctx
        .services
        .registration_service
        .check_eligibility(event.id, Some("user@example.com"))
        .await
        .unwrap();
    assert!(!before.allowed);
    assert!(before.time_remaining.is_some());

    ctx.set_time(2026, 2, 14, 0, 0);
    let after = ctx
        .services
        .registration_service
        .check_eligibility(event.id, Some("user@example.com"))
        .await
        .unwrap();
    assert!(!after.allowed);
}

#[tokio::test]
async fn on_spot_path_selected_with_on_spot_fee() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, on_spot_event())
        .await
        .unwrap();

    ctx.set_time(2026, 2, 14, 10, 0);
    let decision = ctx
        .services
        .registration_service
        .check_eligibility(event.id, Some("walkin@example.com"))
        .await
        .unwrap();
    assert!(decision.allowed);
    assert_eq!(decision.registration_type, Some(RegistrationType::OnSpot));

    let participant = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "walkin@example.com"))
        .await
        .unwrap();
    assert_eq!(participant.registration_type, RegistrationType::OnSpot);
    assert_eq!(participant.entry_fee_paid, 700);
}

#[tokio::test]
async fn daily_closure_leaves_on_spot_open() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, on_spot_event())
        .await
        .unwrap();

    // close the regular path on the event day itself
    ctx.services
        .event_service
        .toggle_daily_closure(
            ADMIN_EMAIL,
            event.id,
            helpers::test_data::event_date(),
            true,
        )
        .await
        .unwrap();

    ctx.set_time(2026, 2, 14, 10, 0);
    let decision = ctx
        .services
        .registration_service
        .check_eligibility(event.id, Some("walkin@example.com"))
        .await
        .unwrap();
    assert!(decision.allowed);
    assert_eq!(decision.registration_type, Some(RegistrationType::OnSpot));
}

#[tokio::test]
async fn volunteer_registers_past_deadline() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    ctx.set_time(2026, 2, 14, 9, 0);
    let participant = ctx
        .services
        .registration_service
        .register_participant(
            Some(VOLUNTEER_EMAIL),
            registration_request(event.id, "desk@example.com"),
        )
        .await
        .unwrap();
    assert_eq!(participant.registration_type, RegistrationType::Regular);
}

#[tokio::test]
async fn team_event_rejects_individual_path() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, team_event(4))
        .await
        .unwrap();

    let result = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "solo@example.com"))
        .await;
    assert_matches!(result, Err(GenesisError::TeamEventRequiresTeam { .. }));
}

#[tokio::test]
async fn team_registration_shares_team_id_and_marks_lead() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, team_event(4))
        .await
        .unwrap();

    let members = ctx
        .services
        .registration_service
        .register_team(
            None,
            team_request(
                event.id,
                "Null Pointers",
                &["lead@example.com", "two@example.com", "three@example.com"],
            ),
        )
        .await
        .unwrap();

    assert_eq!(members.len(), 3);
    let team_id = members[0].team_id.unwrap();
    assert!(members.iter().all(|m| m.team_id == Some(team_id)));
    assert_eq!(members.iter().filter(|m| m.is_team_lead).count(), 1);
    assert!(members[0].is_team_lead);

    // each member has an independent ticket and payment status
    let codes: std::collections::HashSet<_> =
        members.iter().map(|m| m.ticket_code.as_str()).collect();
    assert_eq!(codes.len(), 3);
    assert!(members
        .iter()
        .all(|m| m.payment_status == PaymentStatus::Pending));

    let stored = ctx
        .services
        .event_service
        .get_event(event.id)
        .await
        .unwrap();
    assert_eq!(stored.current_participants, 3);
}

#[tokio::test]
async fn oversized_team_rejected() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, team_event(2))
        .await
        .unwrap();

    let result = ctx
        .services
        .registration_service
        .register_team(
            None,
            team_request(
                event.id,
                "Crowd",
                &["a@example.com", "b@example.com", "c@example.com"],
            ),
        )
        .await;
    assert_matches!(
        result,
        Err(GenesisError::TeamSizeViolation { got: 3, max: 2 })
    );
}

#[tokio::test]
async fn failed_team_member_rolls_back_whole_team() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, team_event(4))
        .await
        .unwrap();

    // occupy the third member's email with an earlier team
    ctx.services
        .registration_service
        .register_team(None, team_request(event.id, "First", &["taken@example.com"]))
        .await
        .unwrap();

    let before = ctx
        .services
        .event_service
        .get_event(event.id)
        .await
        .unwrap()
        .current_participants;

    let result = ctx
        .services
        .registration_service
        .register_team(
            None,
            team_request(
                event.id,
                "Second",
                &[
                    "one@example.com",
                    "two@example.com",
                    "taken@example.com",
                    "four@example.com",
                ],
            ),
        )
        .await;
    assert!(result.is_err());

    // zero of the four members persisted, counter untouched
    let after = ctx
        .services
        .event_service
        .get_event(event.id)
        .await
        .unwrap();
    assert_eq!(after.current_participants, before);
    let participants = ctx
        .services
        .registration_service
        .list_event_participants(event.id)
        .await
        .unwrap();
    assert_eq!(participants.len(), before as usize);
    assert!(participants.iter().all(|p| p.team_name.as_deref() != Some("Second")));
}

#[tokio::test]
async fn capacity_cap_enforced() {
    let ctx = TestContext::new();
    let mut request = individual_event();
    request.max_participants = Some(1);
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, request)
        .await
        .unwrap();

    ctx.services
        .registration_service
        .register_participant(None, registration_request(event.id, "first@example.com"))
        .await
        .unwrap();

    let result = ctx
        .services
        .registration_service
        .register_participant(None, registration_request(event.id, "second@example.com"))
        .await;
    assert_matches!(result, Err(GenesisError::CapacityExhausted { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_keep_counter_consistent() {
    let ctx = TestContext::new();
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = ctx.services.registration_service.clone();
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            service
                .register_participant(
                    None,
                    registration_request(event_id, &format!("user{i}@example.com")),
                )
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 16);

    let stored = ctx
        .services
        .event_service
        .get_event(event.id)
        .await
        .unwrap();
    let participants = ctx
        .services
        .registration_service
        .list_event_participants(event.id)
        .await
        .unwrap();
    assert_eq!(stored.current_participants as usize, participants.len());
    assert_eq!(participants.len(), 16);

    // the clock was pinned before the registrations, so the decision that
    // admitted them is reproducible
    assert_eq!(ctx.clock.now(), base_instant());
}
