use std::sync::Arc;

use auth::Authenticator;
use chirpy::config::Config;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::create_router;
use chirpy::inbound::http::AppState;
use chirpy::outbound::repositories::PostgresChirpRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let signing_secret = config.jwt.signing_secret().map_err(|e| {
        tracing::error!(error = %e, "JWT__SECRET must be set");
        e
    })?;

    tracing::info!(
        platform = ?config.platform,
        http_port = config.server.http_port,
        filepath_root = %config.server.filepath_root,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let access_token_ttl = config.jwt.access_token_ttl()?;
    let authenticator =
        Arc::new(Authenticator::new(&signing_secret).with_access_token_ttl(access_token_ttl));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        *authenticator.password_hasher(),
    ));
    let chirp_service = Arc::new(ChirpService::new(chirp_repository));

    let state = AppState::new(user_service, chirp_service, authenticator, config.platform);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.filepath_root);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
