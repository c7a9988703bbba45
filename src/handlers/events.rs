//! Event administration handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{error_response, Actor, AppState};
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::models::participant::Participant;

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct ParticipantsResponse {
    pub event_id: Uuid,
    pub count: usize,
    pub participants: Vec<Participant>,
}

#[derive(Deserialize)]
pub struct ClosureRequest {
    pub date: NaiveDate,
    pub closed: bool,
}

/// `GET /events`
pub async fn list_events(State(state): State<Arc<AppState>>) -> Response {
    match state.services.event_service.list_active_events().await {
        Ok(events) => Json(EventsResponse {
            count: events.len(),
            events,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// `GET /events/:id`
pub async fn get_event(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    match state.services.event_service.get_event(id).await {
        Ok(event) => Json(event).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /events`
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(request): Json<CreateEventRequest>,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .event_service
        .create_event(&actor_email, request)
        .await
    {
        Ok(event) => Json(event).into_response(),
        Err(err) => error_response(err),
    }
}

/// `PATCH /events/:id`
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(patch): Json<UpdateEventRequest>,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .event_service
        .update_event(&actor_email, id, patch)
        .await
    {
        Ok(event) => Json(event).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /events/:id/closures`
pub async fn toggle_daily_closure(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ClosureRequest>,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .event_service
        .toggle_daily_closure(&actor_email, id, request.date, request.closed)
        .await
    {
        Ok(event) => Json(event).into_response(),
        Err(err) => error_response(err),
    }
}

/// `DELETE /events/:id`
pub async fn deactivate_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .event_service
        .deactivate_event(&actor_email, id)
        .await
    {
        Ok(event) => Json(event).into_response(),
        Err(err) => error_response(err),
    }
}

/// `GET /events/:id/participants`
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Response {
    match state
        .services
        .registration_service
        .list_event_participants(id)
        .await
    {
        Ok(participants) => Json(ParticipantsResponse {
            event_id: id,
            count: participants.len(),
            participants,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}
