use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use super::UNAUTHORIZED_MESSAGE;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Exchange email and password for an access token.
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(|_| unauthorized())?;

    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => unauthorized(),
            _ => ApiError::from(e),
        })?;

    let authenticator = state.authenticator.clone();
    let password_hash = user.password_hash.clone();
    let subject = user.id.as_uuid();
    let result = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&body.password, &password_hash, subject)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?
    .map_err(|e| login_error(&user.id, e))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&user).into(),
            token: result.access_token,
            expires_at: result.expires_at,
        },
    ))
}

fn login_error(user_id: &UserId, error: AuthenticationError) -> ApiError {
    if error.is_unauthorized() {
        tracing::warn!(user_id = %user_id, reason = error.kind(), "Login rejected");
        unauthorized()
    } else {
        ApiError::InternalServerError(format!("Login failed: {}", error))
    }
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;
    use auth::TokenError;

    use super::*;

    #[test]
    fn test_login_error_mapping() {
        let user_id = UserId::new();

        assert_eq!(
            login_error(&user_id, AuthenticationError::InvalidCredentials),
            unauthorized()
        );
        assert_eq!(
            login_error(&user_id, PasswordError::Mismatch.into()),
            unauthorized()
        );
        assert!(matches!(
            login_error(
                &user_id,
                TokenError::EncodingFailed("out of range".to_string()).into()
            ),
            ApiError::InternalServerError(_)
        ));
    }
}
