//! Registration handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{error_response, Actor, AppState};
use crate::models::participant::{
    Participant, RegisterParticipantRequest, RegisterTeamRequest,
};

#[derive(Deserialize)]
pub struct EligibilityQuery {
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct EligibilityResponse {
    pub can_register: bool,
    pub registration_type: Option<String>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,
}

#[derive(Serialize)]
pub struct TeamResponse {
    pub team_id: Option<Uuid>,
    pub members: Vec<Participant>,
}

/// `GET /events/:id/eligibility`
pub async fn check_eligibility(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<EligibilityQuery>,
) -> Response {
    match state
        .services
        .registration_service
        .check_eligibility(event_id, query.email.as_deref())
        .await
    {
        Ok(decision) => Json(EligibilityResponse {
            can_register: decision.allowed,
            registration_type: decision
                .registration_type
                .map(|registration_type| registration_type.as_str().to_string()),
            reason: decision.reason,
            time_remaining: decision.time_remaining,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /registrations`
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(request): Json<RegisterParticipantRequest>,
) -> Response {
    match state
        .services
        .registration_service
        .register_participant(actor.0.as_deref(), request)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /registrations/team`
pub async fn register_team(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(request): Json<RegisterTeamRequest>,
) -> Response {
    match state
        .services
        .registration_service
        .register_team(actor.0.as_deref(), request)
        .await
    {
        Ok(members) => Json(TeamResponse {
            team_id: members.first().and_then(|member| member.team_id),
            members,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}
