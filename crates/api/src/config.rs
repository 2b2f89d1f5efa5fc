use std::path::PathBuf;
use std::str::FromStr;

use shifa_core::seo::DEFAULT_SITE_URL;
use shifa_events::notifier::DEFAULT_ADMIN_EMAIL;

use crate::auth::jwt::JwtConfig;

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Credentials for the first admin account, created when no users exist.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Parsed from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Public origin used in canonical URLs, feeds and content-store keys.
    pub site_url: String,
    /// Directory holding the pre-generated content JSON files.
    pub content_data_dir: PathBuf,
    /// Upload target; `None` disables uploads.
    pub media_upload_dir: Option<PathBuf>,
    /// Base URL of the IP geolocation service.
    pub geolocation_url: String,
    pub admin_notification_email: String,
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                       |
    /// | `SITE_URL`                 | `https://shifaalhind.com`  |
    /// | `CONTENT_DATA_DIR`         | `data`                     |
    /// | `MEDIA_UPLOAD_DIR`         | unset                      |
    /// | `GEOLOCATION_URL`          | `https://ipapi.co`         |
    /// | `ADMIN_NOTIFICATION_EMAIL` | `admin@shifaalhind.com`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let admin_bootstrap = match (
            optional_var("ADMIN_BOOTSTRAP_EMAIL"),
            optional_var("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            _ => None,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: parse_var("SHUTDOWN_TIMEOUT_SECS", 30)?,
            jwt: JwtConfig::from_env()?,
            site_url: optional_var("SITE_URL")
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            content_data_dir: optional_var("CONTENT_DATA_DIR")
                .unwrap_or_else(|| "data".to_string())
                .into(),
            media_upload_dir: optional_var("MEDIA_UPLOAD_DIR").map(PathBuf::from),
            geolocation_url: optional_var("GEOLOCATION_URL")
                .unwrap_or_else(|| "https://ipapi.co".to_string()),
            admin_notification_email: optional_var("ADMIN_NOTIFICATION_EMAIL")
                .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_bootstrap,
        })
    }
}

/// A set, non-blank environment variable.
pub(crate) fn optional_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `var`, falling back to `default` when unset.
pub(crate) fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
