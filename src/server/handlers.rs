use super::types::{GuessRequest, GuessResult, HealthResponse};
use crate::{Error, guess::GuessRelay};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<GuessRelay>,
    pub body_limit_bytes: usize,
}

pub async fn guess(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GuessResult>, Error> {
    let request_id = Uuid::new_v4();

    match handle_guess(&state, payload, request_id).await {
        Ok(result) => {
            info!(
                %request_id,
                confidence = result.confidence,
                "Guessed '{}'",
                result.guess
            );
            Ok(Json(result))
        }
        Err(e) => {
            if e.status().is_server_error() {
                error!(%request_id, code = e.code(), "Guess failed: {}", e);
            } else {
                warn!(%request_id, code = e.code(), "Guess rejected: {}", e);
            }
            Err(e)
        }
    }
}

async fn handle_guess(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
    request_id: Uuid,
) -> crate::Result<GuessResult> {
    // A misconfigured server fails every request, whatever the body holds.
    state.relay.ensure_configured()?;

    // Only undecodable JSON is rejected here; field types are the relay's
    // concern so that authentication still comes first.
    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge {
                limit: state.body_limit_bytes,
            }
        } else {
            Error::InvalidBody(rejection.body_text())
        }
    })?;
    let request = GuessRequest::from(body);

    info!(
        %request_id,
        image_bytes = request.image_len(),
        "Received guess request"
    );

    state.relay.guess(request).await
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
