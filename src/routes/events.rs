// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gateway dispatch intake.

use crate::error::{AppError, Result};
use crate::models::gateway::DispatchEnvelope;
use crate::models::GatewayEvent;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use std::sync::Arc;

/// Event routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/events", post(handle_dispatch))
}

/// Accept one dispatch from the gateway bridge (POST).
///
/// Returns 202 once the event is applied or, for reactions, scheduled.
async fn handle_dispatch(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<StatusCode> {
    let envelope: DispatchEnvelope = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid dispatch envelope: {}", e)))?;

    let name = envelope.t.clone();
    let event = GatewayEvent::from_envelope(envelope).map_err(|e| {
        tracing::warn!(event = %name, error = %e, "Failed to parse dispatch payload");
        AppError::BadRequest(format!("Invalid {} payload: {}", name, e))
    })?;

    tracing::debug!(event = %event.name(), "Dispatch received");
    // Reaction tasks run detached; their failures never reach the bridge.
    let _ = state.normalizer.ingest(event);

    Ok(StatusCode::ACCEPTED)
}
