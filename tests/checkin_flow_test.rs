//! Door check-in integration tests

mod helpers;

use assert_matches::assert_matches;
use chrono::Duration;

use helpers::test_context::{TestContext, ADMIN_EMAIL, VOLUNTEER_EMAIL};
use helpers::test_data::{individual_event, registration_request};
use Genesis::models::participant::Participant;
use Genesis::utils::errors::GenesisError;
use Genesis::utils::Clock;

async fn registered_participant(ctx: &TestContext) -> Participant {
    let event = ctx
        .services
        .event_service
        .create_event(ADMIN_EMAIL, individual_event())
        .await
        .unwrap();
    ctx.services
        .registration_service
        .register_participant(None, registration_request(event.id, "guest@example.com"))
        .await
        .unwrap()
}

#[tokio::test]
async fn first_scan_verifies_and_stamps_time() {
    let ctx = TestContext::new();
    let participant = registered_participant(&ctx).await;

    let outcome = ctx
        .services
        .checkin_service
        .verify_by_code(
            participant.ticket_code.as_str(),
            VOLUNTEER_EMAIL,
            Some("Hall B"),
        )
        .await
        .unwrap();

    assert!(outcome.first_scan);
    assert!(outcome.participant.is_verified);
    assert_eq!(outcome.participant.verification_time, Some(ctx.clock.now()));
    assert_eq!(outcome.participant.assigned_room.as_deref(), Some("Hall B"));

    let records = ctx
        .services
        .checkin_service
        .verification_history(participant.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actor, VOLUNTEER_EMAIL);
}

#[tokio::test]
async fn rescan_is_noop_success_with_original_timestamp() {
    let ctx = TestContext::new();
    let participant = registered_participant(&ctx).await;

    let first = ctx
        .services
        .checkin_service
        .verify_by_code(participant.ticket_code.as_str(), VOLUNTEER_EMAIL, None)
        .await
        .unwrap();
    let first_time = first.participant.verification_time;

    ctx.clock.advance(Duration::minutes(30));
    let second = ctx
        .services
        .checkin_service
        .verify_by_code(participant.ticket_code.as_str(), VOLUNTEER_EMAIL, None)
        .await
        .unwrap();

    assert!(!second.first_scan);
    assert!(second.participant.is_verified);
    assert_eq!(second.participant.verification_time, first_time);

    // every scan still lands in the audit trail
    let records = ctx
        .services
        .checkin_service
        .verification_history(participant.id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn garbage_scan_rejected_before_lookup() {
    let ctx = TestContext::new();
    registered_participant(&ctx).await;

    for raw in ["", "hello", "GENESIS:1.0:zzz", "ticket GENESIS:1.0"] {
        let result = ctx
            .services
            .checkin_service
            .verify_by_code(raw, VOLUNTEER_EMAIL, None)
            .await;
        assert_matches!(result, Err(GenesisError::InvalidTicketCode), "accepted {raw:?}");
    }
}

#[tokio::test]
async fn unknown_ticket_code_fails() {
    let ctx = TestContext::new();
    registered_participant(&ctx).await;

    let stranger = Genesis::models::ticket::TicketCode::generate();
    let result = ctx
        .services
        .checkin_service
        .verify_by_code(stranger.as_str(), VOLUNTEER_EMAIL, None)
        .await;
    assert_matches!(result, Err(GenesisError::UnknownTicket));
}

#[tokio::test]
async fn participants_may_not_verify() {
    let ctx = TestContext::new();
    let participant = registered_participant(&ctx).await;

    let result = ctx
        .services
        .checkin_service
        .verify_by_code(
            participant.ticket_code.as_str(),
            "guest@example.com",
            None,
        )
        .await;
    assert_matches!(result, Err(GenesisError::PermissionDenied(_)));
}

#[tokio::test]
async fn admin_may_verify_by_participant_id() {
    let ctx = TestContext::new();
    let participant = registered_participant(&ctx).await;

    let outcome = ctx
        .services
        .checkin_service
        .verify_participant(participant.id, ADMIN_EMAIL, None)
        .await
        .unwrap();
    assert!(outcome.first_scan);
    assert!(outcome.participant.is_verified);
}
