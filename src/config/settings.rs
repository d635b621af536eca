//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Longest accepted token lifetime, one hundred years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 100;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL or in-memory)
    pub database: DatabaseSettings,

    /// Token authentication settings
    pub auth: AuthSettings,

    /// Credentials used by `init-superuser`
    #[serde(default)]
    pub admin: AdminSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Relational store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Keep all state in process memory instead of PostgreSQL
    pub in_memory: bool,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

/// Token authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Token lifetime in hours; 0 disables expiry
    pub token_ttl_hours: i64,
}

/// Superuser bootstrap credentials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if no database URL is configured for a PostgreSQL store.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.in_memory", false)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.token_ttl_hours", 10)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=8000 -> server.port = 8000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.token_ttl_hours", std::env::var("TOKEN_TTL_HOURS").ok())?
            .set_override_option("admin.username", std::env::var("ADMIN_USERNAME").ok())?
            .set_override_option("admin.password", std::env::var("ADMIN_PASSWORD").ok())?
            .build()?
            .try_deserialize()
            .and_then(Self::validate)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.database.in_memory && self.database.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) must be set unless database.in_memory is enabled"
                    .into(),
            ));
        }
        if !(0..=MAX_TOKEN_TTL_HOURS).contains(&self.auth.token_ttl_hours) {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_hours must be between 0 and {}, got {}",
                MAX_TOKEN_TTL_HOURS, self.auth.token_ttl_hours
            )));
        }
        Ok(self)
    }

    /// Settings for an in-memory instance bound to an ephemeral port.
    pub fn in_memory() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseSettings {
                url: String::new(),
                max_connections: 1,
                min_connections: 0,
                acquire_timeout: 5,
                in_memory: true,
                run_migrations: false,
            },
            auth: AuthSettings { token_ttl_hours: 10 },
            admin: AdminSettings::default(),
            cors: CorsSettings {
                allowed_origins: Vec::new(),
            },
            environment: "test".into(),
        }
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AuthSettings {
    /// Token lifetime, `None` when tokens never expire.
    pub fn token_ttl(&self) -> Option<chrono::Duration> {
        if self.token_ttl_hours <= 0 {
            return None;
        }
        chrono::Duration::try_hours(self.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS))
    }
}
