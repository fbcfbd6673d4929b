//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Loaded configuration (JWT secret, provider settings)
//! - HTTP client for identity provider requests
//! - OAuth2 clients for Google and Apple sign-in
//! - Object store used for upload presigning

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, ExtraTokenFields,
    RevocationErrorResponseType, StandardErrorResponse, StandardRevocableToken,
    StandardTokenIntrospectionResponse, StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::server::{config::Config, storage::ObjectStore};

/// Extra token response fields carrying the OpenID Connect identity token.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdTokenFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl ExtraTokenFields for IdTokenFields {}

/// Token response returned by both identity providers.
pub(crate) type OAuth2TokenResponse = StandardTokenResponse<IdTokenFields, BasicTokenType>;

/// Type alias for an OAuth2 client with authorization and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    OAuth2TokenResponse,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection is a pool handle, the
/// configuration and object store sit behind `Arc`, and `reqwest::Client`
/// is reference counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Configuration loaded once at startup.
    pub config: Arc<Config>,

    /// HTTP client for identity provider requests.
    ///
    /// Configured without redirects so that token and userinfo calls cannot be
    /// bounced to arbitrary hosts.
    pub http_client: reqwest::Client,

    /// OAuth2 client for Google sign-in.
    pub google_oauth: OAuth2Client,

    /// OAuth2 client for Sign in with Apple.
    pub apple_oauth: OAuth2Client,

    /// Object store for presigned uploads.
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded configuration
    /// - `http_client` - HTTP client for external API requests
    /// - `google_oauth` - OAuth2 client for Google
    /// - `apple_oauth` - OAuth2 client for Apple
    /// - `storage` - Object store backend
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        http_client: reqwest::Client,
        google_oauth: OAuth2Client,
        apple_oauth: OAuth2Client,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            db,
            config,
            http_client,
            google_oauth,
            apple_oauth,
            storage,
        }
    }
}
