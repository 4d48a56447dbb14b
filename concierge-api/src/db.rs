//! Database Connection Pool Module
//!
//! PostgreSQL access for the two tables this service touches: the read-only
//! `c_number_data` lookup table and the append-only `assistance_requests`
//! log. Connections come from a deadpool-postgres pool; each operation
//! acquires a connection for exactly one statement and releases it.

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use serde_json::Value as JsonValue;
use tokio_postgres::NoTls;

use concierge_core::{AssistanceRequest, Receipt};

use crate::error::{ApiError, ApiResult, ErrorCode};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
///
/// A `DATABASE_URL` connection string takes precedence; otherwise the
/// discrete host/port/user/password/database settings apply.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full connection string (`DATABASE_URL`), if provided.
    pub url: Option<String>,
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            dbname: "concierge".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host: std::env::var("CONCIERGE_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("CONCIERGE_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("CONCIERGE_DB_NAME")
                .unwrap_or_else(|_| "concierge".to_string()),
            user: std::env::var("CONCIERGE_DB_USER")
                .unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("CONCIERGE_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("CONCIERGE_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
        }
    }

    /// Resolve the effective tokio-postgres configuration.
    pub fn pg_config(&self) -> ApiResult<tokio_postgres::Config> {
        if let Some(url) = &self.url {
            return url.parse::<tokio_postgres::Config>().map_err(|e| {
                tracing::error!("Invalid DATABASE_URL: {:?}", e);
                ApiError::new(ErrorCode::DatabaseError, "Invalid database connection string")
            });
        }

        let mut cfg = tokio_postgres::Config::new();
        cfg.host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user);
        if !self.password.is_empty() {
            cfg.password(&self.password);
        }
        Ok(cfg)
    }

    /// Create a connection pool from this configuration.
    ///
    /// The pool does not dial the database here; the first acquired
    /// connection does.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let manager = Manager::from_config(
            self.pg_config()?,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        Pool::builder(manager)
            .max_size(self.max_size)
            .build()
            .map_err(|e| {
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to create pool: {}", e),
                )
            })
    }
}

// ============================================================================
// DATABASE CLIENT
// ============================================================================

/// Injected store handle wrapping the connection pool.
///
/// Handlers receive a clone of this through the router state instead of
/// reaching for a process-wide singleton.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Fetch the payload stored for an authentication tag, if any.
    ///
    /// The table is expected to hold at most one row per tag; if that ever
    /// breaks, the first row wins.
    pub async fn lookup_payload(&self, tag: &str) -> ApiResult<Option<JsonValue>> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT data_payload FROM c_number_data WHERE hmac_value = $1",
                &[&tag],
            )
            .await?;

        Ok(rows.first().map(|row| row.get(0)))
    }

    /// Append an assistance request and return its store-generated receipt.
    pub async fn submit_assistance_request(
        &self,
        request: &AssistanceRequest,
    ) -> ApiResult<Receipt> {
        let conn = self.get_conn().await?;

        let row = conn
            .query_one(
                "INSERT INTO assistance_requests (name, email, issue_description) \
                 VALUES ($1, $2, $3) RETURNING id, submitted_at",
                &[&request.name, &request.email, &request.issue_description],
            )
            .await?;

        Ok(Receipt {
            id: row.get(0),
            submitted_at: row.get(1),
        })
    }

    /// Cheap connectivity probe used by the readiness endpoint and the
    /// startup gate.
    pub async fn health_check(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_postgres() {
        let config = DbConfig::default();
        assert!(config.url.is_none());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "concierge");
        assert_eq!(config.max_size, 16);
    }

    #[test]
    fn pool_builds_without_dialing_the_database() {
        // No server is listening in unit tests; building the pool must still
        // succeed because connections are established lazily.
        let config = DbConfig::default();
        assert!(config.create_pool().is_ok());
    }

    #[test]
    fn connection_string_takes_precedence() {
        let config = DbConfig {
            url: Some("postgresql://user:pw@db.example.com:6432/portal".to_string()),
            ..DbConfig::default()
        };
        let pg = config.pg_config().unwrap();
        assert_eq!(pg.get_ports(), &[6432]);
        assert_eq!(pg.get_dbname(), Some("portal"));
    }

    #[test]
    fn malformed_connection_string_is_rejected() {
        let config = DbConfig {
            url: Some("not-a-connection-string".to_string()),
            ..DbConfig::default()
        };
        assert!(config.pg_config().is_err());
    }
}
