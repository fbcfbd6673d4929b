mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    config::Config, error::AppError, router, startup, state::AppState,
    storage::s3::S3ObjectStore,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing(&config);

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let google_oauth = startup::setup_google_oauth_client(&config)?;
    let apple_oauth = startup::setup_apple_oauth_client(&config)?;
    let storage = Arc::new(S3ObjectStore::new(&config.s3));

    let server_addr = config.server_addr.clone();
    let state = AppState::new(
        db,
        Arc::new(config),
        http_client,
        google_oauth,
        apple_oauth,
        storage,
    );

    let app = router::router(state, session);

    let listener = tokio::net::TcpListener::bind(&server_addr).await?;
    tracing::info!("Listening on {}", server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
