//! Service configuration.
//!
//! All settings come from environment variables, read once at startup into an
//! explicit [`AppConfig`] that is handed to the router and handlers. Nothing
//! reads the environment after boot, and there are no process-wide globals.

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ApiError, ApiResult, ErrorCode};

/// Placeholder secret used when `SECRET_KEY` is unset. Development only;
/// never deploy with it.
const DEV_SECRET_KEY: &str = "your-secret-key";

/// Application configuration for the HTTP server.
#[derive(Debug)]
pub struct AppConfig {
    /// Interface to bind (`CONCIERGE_BIND`, default `0.0.0.0`).
    pub bind: String,
    /// Listening port (`PORT`, falling back to `CONCIERGE_PORT`, default 3000).
    pub port: u16,
    /// Shared secret for token verification (`SECRET_KEY`).
    pub secret_key: SecretString,
    /// Directory holding the client bundle (`STATIC_DIR`, default `public`).
    pub static_dir: PathBuf,
    /// Allowed CORS origins (`CONCIERGE_CORS_ORIGINS`, comma-separated).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            secret_key: SecretString::new(DEV_SECRET_KEY.into()),
            static_dir: PathBuf::from("public"),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from environment variables.
    pub fn from_env() -> Self {
        let bind = std::env::var("CONCIERGE_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("CONCIERGE_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let secret_key = match std::env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => SecretString::new(secret.into()),
            _ => {
                tracing::warn!(
                    "SECRET_KEY is not set; using the development placeholder secret"
                );
                SecretString::new(DEV_SECRET_KEY.into())
            }
        };

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let cors_origins = std::env::var("CONCIERGE_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind,
            port,
            secret_key,
            static_dir,
            cors_origins,
        }
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind, self.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::new(
                ErrorCode::InternalError,
                format!("Invalid bind address {}: {}", addr, e),
            )
        })
    }

    /// True when the configured secret is the insecure development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key.expose_secret() == DEV_SECRET_KEY
    }
}
