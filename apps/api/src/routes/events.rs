use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::state::AppState;

const DEFAULT_TIMEOUT_MS: u64 = 25_000;
const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Deserialize)]
pub struct NextEventQuery {
    pub timeout_ms: Option<u64>,
}

/// GET /api/v1/events/next?timeout_ms=
/// Long-polls for the next store change. 204 when nothing happened before the timeout.
pub async fn handle_next_event(
    State(state): State<AppState>,
    Query(params): Query<NextEventQuery>,
) -> Response {
    let wait = Duration::from_millis(
        params
            .timeout_ms
            .unwrap_or(DEFAULT_TIMEOUT_MS)
            .min(MAX_TIMEOUT_MS),
    );
    let mut rx = state.storage.subscribe();

    let next = tokio::time::timeout(wait, async {
        loop {
            match rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Event listener lagged"),
                Err(RecvError::Closed) => return None,
            }
        }
    })
    .await;

    match next {
        Ok(Some(event)) => Json(event).into_response(),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}
