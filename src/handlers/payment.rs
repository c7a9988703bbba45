//! Payment handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::{error_response, Actor, AppState};

#[derive(Deserialize)]
pub struct OnlinePaymentRequest {
    pub transaction_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ReceiptRequest {
    pub receipt_url: String,
}

#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub transaction_id: Option<String>,
}

#[derive(Deserialize)]
pub struct TransactionRequest {
    pub transaction_id: String,
}

/// `POST /participants/:id/payment/online`
pub async fn complete_online_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<OnlinePaymentRequest>,
) -> Response {
    match state
        .services
        .payment_service
        .complete_online_payment(id, request.transaction_id)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /participants/:id/payment/receipt`
///
/// First upload and re-upload after a rejection both land here.
pub async fn submit_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReceiptRequest>,
) -> Response {
    match state
        .services
        .payment_service
        .submit_receipt(id, request.receipt_url)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /participants/:id/payment/confirm`
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ConfirmRequest>,
) -> Response {
    let actor_email = match actor.required() {
        Ok(email) => email.to_string(),
        Err(err) => return error_response(err),
    };
    match state
        .services
        .payment_service
        .confirm_payment(&actor_email, id, request.transaction_id)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /participants/:id/payment/reject`
pub async fn reject_payment(
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
        .payment_service
        .reject_payment(&actor_email, id)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /participants/:id/payment/transaction`
pub async fn attach_transaction_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<TransactionRequest>,
) -> Response {
    if let Err(err) = actor.required() {
        return error_response(err);
    }
    match state
        .services
        .payment_service
        .attach_transaction_id(id, request.transaction_id)
        .await
    {
        Ok(participant) => Json(participant).into_response(),
        Err(err) => error_response(err),
    }
}
