use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visited_countries::{
    country::repository::{InMemoryCountryRepository, PostgresCountryRepository},
    create_router, db,
    user::repository::{InMemoryUserRepository, PostgresUserRepository},
    AppConfig, AppState, PasswordHasher, TokenConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visited_countries=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting visited countries server");

    let config = AppConfig::from_env()?;
    info!(config = ?config, "Configuration loaded");

    let app_state = match &config.database {
        Some(database) => {
            let pool = db::connect(database).await?;
            AppState::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresCountryRepository::new(pool)),
                TokenConfig::new(&config.jwt_secret, config.token_expiration_days),
                PasswordHasher::new(config.bcrypt_cost),
            )
        }
        None => {
            warn!("No database configured, data will be kept in memory only");
            AppState::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryCountryRepository::new()),
                TokenConfig::new(&config.jwt_secret, config.token_expiration_days),
                PasswordHasher::new(config.bcrypt_cost),
            )
        }
    };

    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
