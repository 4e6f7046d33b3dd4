use std::sync::Arc;

use auth::TokenService;
use identity_service::config::Config;
use identity_service::domain::federation::service::OAuthFederator;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::oauth::GoogleIdentityProvider;
use identity_service::outbound::repositories::PostgresUserRepository;
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
    let frontend_url = config.frontend_url()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        frontend_url = %frontend_url,
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

    let token_service = Arc::new(TokenService::new(config.jwt.secret.as_bytes())?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let identity_provider = Arc::new(GoogleIdentityProvider::new(&config)?);

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let federation_service = Arc::new(OAuthFederator::new(
        identity_provider,
        user_repository,
        Arc::clone(&token_service),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        federation_service,
        token_service,
        frontend_url,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
