//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::ui::state::AppState;

/// Wire representation of one directory entry.
#[derive(Debug, Serialize)]
pub struct ConnectionDto {
    #[serde(rename = "connectionId")]
    pub connection_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing the current connection directory contents.
pub async fn debug_connections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ConnectionDto>>, StatusCode> {
    match state.directory.find_all().await {
        Ok(connections) => Ok(Json(
            connections
                .into_iter()
                .map(|connection| ConnectionDto {
                    connection_id: connection.id.as_str().to_string(),
                    user_id: connection.user.id.as_str().to_string(),
                })
                .collect(),
        )),
        Err(e) => {
            tracing::error!("Failed to list connections: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
