//! HTTP server: loads settings from the environment, bootstraps the schema, serves the API.

use galaxy_api::{apply_migrations, app, ensure_database_exists, AppState, PgStore, Settings, TokenIssuer};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("galaxy_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;

    if settings.auto_migrate {
        apply_migrations(&pool).await?;
    } else {
        tracing::info!("AUTO_MIGRATE disabled, skipping schema bootstrap");
    }

    let tokens = TokenIssuer::new(settings.jwt_secret.as_bytes(), settings.token_ttl);
    let state = AppState::new(PgStore::new(pool), tokens);

    let listener = TcpListener::bind(settings.bind_target()).await?;
    tracing::info!("galaxy-api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
