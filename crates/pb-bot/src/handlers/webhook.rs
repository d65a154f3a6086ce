// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Webhook endpoint receiving Bot API updates

use crate::state::AppState;
use crate::telegram::Update;
use axum::{extract::State, http::StatusCode, Json};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Queue an update for the dispatcher.
///
/// The Bot API retries deliveries that are not acknowledged with 2xx, so a
/// full or closed queue answers 503.
pub async fn receive_update(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> StatusCode {
    let update_id = update.update_id;
    match state.updates.try_send(update) {
        Ok(()) => {
            debug!(update_id, "update queued");
            StatusCode::OK
        }
        Err(TrySendError::Full(_)) => {
            warn!(update_id, "update queue is full");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(TrySendError::Closed(_)) => {
            warn!(update_id, "dispatcher is not running");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
