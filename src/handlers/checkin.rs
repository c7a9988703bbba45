//! Check-in handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{error_response, Actor, AppState};
use crate::models::participant::Participant;
use crate::models::verification::VerificationRecord;

#[derive(Deserialize)]
pub struct CheckinRequest {
    pub code: String,
    pub assigned_room: Option<String>,
}

#[derive(Serialize)]
pub struct CheckinResponse {
    pub participant: Participant,
    pub first_scan: bool,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub participant_id: Uuid,
    pub count: usize,
    pub records: Vec<VerificationRecord>,
}

/// `POST /checkin`
pub async fn verify_by_code(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(request): Json<CheckinRequest>,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .checkin_service
        .verify_by_code(&request.code, &actor_email, request.assigned_room.as_deref())
        .await
    {
        Ok(outcome) => Json(CheckinResponse {
            participant: outcome.participant,
            first_scan: outcome.first_scan,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// `GET /participants/:id/verifications`
pub async fn verification_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.services.checkin_service.verification_history(id).await {
        Ok(records) => Json(HistoryResponse {
            participant_id: id,
            count: records.len(),
            records,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}
