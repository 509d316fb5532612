// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command endpoints called by the slash-command layer.

use crate::error::{AppError, Result};
use crate::models::platform::snowflake;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Command routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/commands/check/{user_id}", get(check))
        .route("/commands/status", post(status))
}

/// Reply content for the command layer to send back to Discord.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub content: String,
    /// Only visible to the invoking user
    pub ephemeral: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(with = "snowflake")]
    pub caller_id: u64,
}

/// Last recorded activity for a member.
async fn check(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CommandResponse>> {
    let user_id: u64 = user_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid user ID: {}", user_id)))?;

    Ok(Json(CommandResponse {
        content: state.query_service.describe_last_activity(user_id),
        ephemeral: true,
    }))
}

/// Uptime and the caller's previous status query.
async fn status(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StatusRequest>,
) -> Json<CommandResponse> {
    tracing::debug!(caller_id = request.caller_id, "Status requested");
    Json(CommandResponse {
        content: state.query_service.describe_status(request.caller_id),
        ephemeral: false,
    })
}
