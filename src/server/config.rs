use crate::server::error::config::ConfigError;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const APPLE_AUTH_URL: &str = "https://appleid.apple.com/auth/authorize";
pub const APPLE_TOKEN_URL: &str = "https://appleid.apple.com/auth/token";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_DIST_DIR: &str = "admin/dist";

/// Client credentials for one OAuth provider.
#[derive(Clone, Debug)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

/// Object store connection settings.
#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible stores, AWS when absent.
    pub endpoint: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,

    pub google: OAuthProviderConfig,
    pub apple: OAuthProviderConfig,

    pub s3: S3Config,

    pub log_level: String,
    pub server_addr: String,
    pub admin_dist_dir: String,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable was present
    /// - `Err(ConfigError::MissingEnvVar)` - The first missing required variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let optional = |name: &str, default: &str| -> String {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            google: OAuthProviderConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                redirect_url: required("GOOGLE_REDIRECT_URL")?,
            },
            apple: OAuthProviderConfig {
                client_id: required("APPLE_CLIENT_ID")?,
                client_secret: required("APPLE_CLIENT_SECRET")?,
                redirect_url: required("APPLE_REDIRECT_URL")?,
            },
            s3: S3Config {
                bucket: required("S3_BUCKET")?,
                region: required("S3_REGION")?,
                access_key_id: required("S3_ACCESS_KEY_ID")?,
                secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
                endpoint: lookup("S3_ENDPOINT").filter(|value| !value.is_empty()),
            },
            log_level: optional("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            server_addr: optional("SERVER_ADDR", DEFAULT_SERVER_ADDR),
            admin_dist_dir: optional("ADMIN_DIST_DIR", DEFAULT_ADMIN_DIST_DIR),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;

    pub(crate) fn test_env() -> HashMap<&'static str, String> {
        [
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "test-secret"),
            ("GOOGLE_CLIENT_ID", "google-client"),
            ("GOOGLE_CLIENT_SECRET", "google-secret"),
            ("GOOGLE_REDIRECT_URL", "http://localhost:8080/callback/google"),
            ("APPLE_CLIENT_ID", "apple-client"),
            ("APPLE_CLIENT_SECRET", "apple-secret"),
            ("APPLE_REDIRECT_URL", "http://localhost:8080/callback/apple"),
            ("S3_BUCKET", "algolearn"),
            ("S3_REGION", "us-east-1"),
            ("S3_ACCESS_KEY_ID", "key"),
            ("S3_SECRET_ACCESS_KEY", "secret"),
        ]
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
    }

    /// Configuration used by router-level tests.
    pub(crate) fn test_config() -> Config {
        let env = test_env();
        match Config::from_lookup(|name| env.get(name).cloned()) {
            Ok(config) => config,
            Err(err) => panic!("test config incomplete: {}", err),
        }
    }

    #[test]
    fn loads_required_and_defaults() {
        let config = test_config();

        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.s3.bucket, "algolearn");
        assert_eq!(config.s3.endpoint, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server_addr, "0.0.0.0:8080");
        assert_eq!(config.admin_dist_dir, "admin/dist");
    }

    #[test]
    fn reports_missing_variable_by_name() {
        let mut env = test_env();
        env.remove("JWT_SECRET");

        let result = Config::from_lookup(|name| env.get(name).cloned());

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref name)) if name == "JWT_SECRET"
        ));
    }

    #[test]
    fn treats_empty_variable_as_missing() {
        let mut env = test_env();
        env.insert("S3_BUCKET", String::new());

        let result = Config::from_lookup(|name| env.get(name).cloned());

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref name)) if name == "S3_BUCKET"
        ));
    }

    #[test]
    fn reads_optional_overrides() {
        let mut env = test_env();
        env.insert("S3_ENDPOINT", "http://localhost:9000".to_string());
        env.insert("LOG_LEVEL", "debug".to_string());

        let config = match Config::from_lookup(|name| env.get(name).cloned()) {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        };

        assert_eq!(config.s3.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.log_level, "debug");
    }
}
