use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

/// Plain-text file server hit count.
pub async fn metrics(State(state): State<AppState>) -> String {
    format!("Hits: {}", state.metrics.file_server_hits())
}

/// Zero the hit counter and delete every user. Dev platform only.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Reset refused outside dev");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    let removed_users = state.user_service.reset().await.map_err(ApiError::from)?;
    state.metrics.reset();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData {
            hits: state.metrics.file_server_hits(),
            removed_users,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub hits: u64,
    pub removed_users: u64,
}
