use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;

/// Length-check and clean a chirp without storing it.
pub async fn validate_chirp(
    Json(body): Json<ValidateChirpRequest>,
) -> Result<ApiSuccess<ValidateChirpResponseData>, ApiError> {
    let cleaned = ChirpBody::new(&body.body).map_err(ChirpError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateChirpResponseData {
            cleaned_body: cleaned.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateChirpRequest {
    body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateChirpResponseData {
    pub cleaned_body: String,
}
