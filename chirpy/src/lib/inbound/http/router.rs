use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_chirp;
use super::handlers::create_user;
use super::handlers::get_chirp;
use super::handlers::healthz;
use super::handlers::list_chirps;
use super::handlers::login;
use super::handlers::metrics;
use super::handlers::reset;
use super::handlers::validate_chirp;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_file_server_hits;
use super::middleware::ApiMetrics;
use crate::config::Platform;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub metrics: Arc<ApiMetrics>,
    pub platform: Platform,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServicePort>,
        chirp_service: Arc<dyn ChirpServicePort>,
        authenticator: Arc<Authenticator>,
        platform: Platform,
    ) -> Self {
        Self {
            user_service,
            chirp_service,
            authenticator,
            metrics: Arc::new(ApiMetrics::new()),
            platform,
        }
    }
}

/// Build the HTTP application.
///
/// # Arguments
/// * `state` - Services shared by every handler
/// * `filepath_root` - Directory served under `/app`
pub fn create_router(state: AppState, filepath_root: &str) -> Router {
    let file_server = Router::new()
        .nest_service("/app", ServeDir::new(filepath_root))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            count_file_server_hits,
        ));

    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/validate_chirp", post(validate_chirp))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/chirps", get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let protected_routes = Router::new()
        .route("/api/chirps", post(create_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(file_server)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
