use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use identity_service::config::Config;
use identity_service::domain::identity::models::access_token_ttl;
use identity_service::domain::identity::ports::IdentityServicePort;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::avatar::GravatarAvatarDeriver;
use identity_service::outbound::repositories::InMemoryIdentityRepository;
use identity_service::outbound::repositories::PostgresIdentityRepository;
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

    let persistence = match config.database {
        Some(_) => "postgresql",
        None => "memory",
    };
    tracing::info!(
        http_port = config.server.http_port,
        persistence,
        password_memory_kib = config.password.memory_kib,
        password_iterations = config.password.iterations,
        avatar_size = config.avatar.size,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::with_password_hasher(
        config.jwt.secret.as_bytes(),
        access_token_ttl(),
        password_hasher,
    ));
    let avatar_deriver = Arc::new(GravatarAvatarDeriver::new(
        config.avatar.size,
        config.avatar.rating.clone(),
        config.avatar.default.clone(),
    ));

    let identity_service: Arc<dyn IdentityServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(IdentityService::new(
                Arc::new(PostgresIdentityRepository::new(pg_pool)),
                avatar_deriver,
                Arc::clone(&authenticator),
            ))
        }
        None => {
            tracing::warn!("No database configured, identities are kept in memory");

            Arc::new(IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                avatar_deriver,
                Arc::clone(&authenticator),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, authenticator);

    match axum::serve(http_listener, http_application).await {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(())
}
