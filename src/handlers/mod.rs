//! HTTP handlers
//!
//! Axum handlers exposing the registration, payment and check-in workflows.
//! Authentication happens upstream; the gateway forwards the signed-in
//! user's email in the `x-actor-email` header and these handlers treat it
//! as verified.

pub mod checkin;
pub mod events;
pub mod payment;
pub mod registration;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::services::ServiceFactory;
use crate::utils::errors::GenesisError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
}

/// JSON error body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Signed-in actor forwarded by the gateway, when present
pub struct Actor(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get("x-actor-email")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        Ok(Actor(email))
    }
}

impl Actor {
    /// The actor's email, or a permission error for admin-only routes
    pub fn required(&self) -> Result<&str, GenesisError> {
        self.0
            .as_deref()
            .ok_or_else(|| GenesisError::PermissionDenied("sign-in required".to_string()))
    }
}

/// Map the error taxonomy onto HTTP statuses
pub fn error_response(err: GenesisError) -> Response {
    let status = match &err {
        GenesisError::EventNotFound { .. }
        | GenesisError::ParticipantNotFound { .. }
        | GenesisError::UnknownTicket => StatusCode::NOT_FOUND,
        GenesisError::RegistrationClosed { .. } => StatusCode::FORBIDDEN,
        GenesisError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        GenesisError::CapacityExhausted { .. }
        | GenesisError::DuplicateTransactionId { .. }
        | GenesisError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
        GenesisError::InvalidInput(_)
        | GenesisError::InvalidTicketCode
        | GenesisError::TeamEventRequiresTeam { .. }
        | GenesisError::NotATeamEvent { .. }
        | GenesisError::TeamSizeViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::deactivate_event),
        )
        .route("/events/:id/closures", post(events::toggle_daily_closure))
        .route("/events/:id/participants", get(events::list_participants))
        .route("/events/:id/eligibility", get(registration::check_eligibility))
        .route("/registrations", post(registration::register_participant))
        .route("/registrations/team", post(registration::register_team))
        .route(
            "/participants/:id/payment/online",
            post(payment::complete_online_payment),
        )
        .route(
            "/participants/:id/payment/receipt",
            post(payment::submit_receipt),
        )
        .route(
            "/participants/:id/payment/confirm",
            post(payment::confirm_payment),
        )
        .route(
            "/participants/:id/payment/reject",
            post(payment::reject_payment),
        )
        .route(
            "/participants/:id/payment/transaction",
            post(payment::attach_transaction_id),
        )
        .route("/checkin", post(checkin::verify_by_code))
        .route(
            "/participants/:id/verifications",
            get(checkin::verification_history),
        )
        .with_state(state)
}
