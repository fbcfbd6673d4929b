use oauth2::{AuthType, AuthUrl, Client, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::{
        Config, OAuthProviderConfig, APPLE_AUTH_URL, APPLE_TOKEN_URL, GOOGLE_AUTH_URL,
        GOOGLE_TOKEN_URL,
    },
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set, otherwise `LOG_LEVEL` from the
/// configuration is used as the filter.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Postgres database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before the first
/// request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions only carry OAuth CSRF state, so they expire after a short period of
/// inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let pool = db.get_postgres_connection_pool().clone();
    let session_store = PostgresStore::new(pool);

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(15))))
}

/// Builds the HTTP client used for identity provider calls.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Google OAuth2 client.
pub fn setup_google_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    build_oauth_client(&config.google, "GOOGLE", GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL)
}

/// Builds the Apple OAuth2 client.
///
/// Apple expects the client credentials in the token request body.
pub fn setup_apple_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = build_oauth_client(&config.apple, "APPLE", APPLE_AUTH_URL, APPLE_TOKEN_URL)?;

    Ok(client.set_auth_type(AuthType::RequestBody))
}

fn build_oauth_client(
    provider: &OAuthProviderConfig,
    env_prefix: &str,
    auth_url: &str,
    token_url: &str,
) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, err: url::ParseError| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
    };

    let auth_url =
        AuthUrl::new(auth_url.to_string()).map_err(|e| invalid("auth url", e))?;
    let token_url =
        TokenUrl::new(token_url.to_string()).map_err(|e| invalid("token url", e))?;
    let redirect_url = RedirectUrl::new(provider.redirect_url.clone())
        .map_err(|e| invalid(&format!("{}_REDIRECT_URL", env_prefix), e))?;

    let client: OAuth2Client = Client::new(ClientId::new(provider.client_id.clone()))
        .set_client_secret(ClientSecret::new(provider.client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}
