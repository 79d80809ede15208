use std::sync::Arc;

use auth::JwtHandler;
use chrono::Duration;
use identity_service::config::Config;
use identity_service::domain::account::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::identity::GoogleIdentityVerifier;
use identity_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_expiration_hours = config.jwt.expiration_hours,
        google_token_url = %config.google.token_url,
        google_userinfo_url = %config.google.userinfo_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));
    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let identity_verifier = Arc::new(GoogleIdentityVerifier::new(config.google.clone())?);

    let auth_service = Arc::new(AuthService::new(
        user_store,
        identity_verifier,
        Arc::clone(&jwt_handler),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service, jwt_handler);

    axum::serve(listener, application).await?;

    Ok(())
}
