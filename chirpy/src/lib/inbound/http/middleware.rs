use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;

/// Message returned for every rejected bearer credential.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or missing access token";

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer token and adds the user to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| {
            tracing::warn!(reason = "malformed_header", "Request authentication failed");
            ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
        })?,
        None => "",
    };

    let user_id = authenticator.authorize(header_value).map_err(|e| {
        if !e.is_unauthorized() {
            return ApiError::InternalServerError(format!("Authorization failed: {}", e));
        }
        tracing::warn!(reason = e.kind(), "Request authentication failed");
        ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(user_id),
    });

    Ok(next.run(req).await)
}

/// Request counters shared across handlers.
#[derive(Debug, Default)]
pub struct ApiMetrics {
    file_server_hits: AtomicU64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_server_hit(&self) {
        self.file_server_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn file_server_hits(&self) -> u64 {
        self.file_server_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.file_server_hits.store(0, Ordering::Relaxed);
    }
}

/// Middleware that counts requests reaching the static file server
pub async fn count_file_server_hits(
    State(metrics): State<Arc<ApiMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    metrics.record_file_server_hit();
    next.run(req).await
}
