//! Service configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded). Missing values fall back to local-development defaults; values
//! that are present but unparsable abort startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_JWT_KEY: &str = "874967EC3EA3490F8F2EF6478B72A756";

#[derive(Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub jwt_key: String,
    pub password_pepper: Option<String>,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("POSTGRES_USER", "postgres"),
                var("POSTGRES_PASSWORD", "postgres"),
                var("POSTGRES_HOST", "localhost"),
                parse::<u16>(&lookup, "POSTGRES_PORT", 5432)?,
                var("POSTGRES_DB", "postgres"),
            ),
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            run_migrations: parse(&lookup, "RUN_MIGRATIONS", true)?,
            jwt_key: var("JWT_KEY", DEFAULT_JWT_KEY),
            password_pepper: lookup("PASSWORD_PEPPER").filter(|p| !p.is_empty()),
            host: var("HOST", "localhost"),
            port: parse(&lookup, "PORT", 10000)?,
            request_timeout: Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            frontend_origins,
        })
    }

    pub fn uses_default_jwt_key(&self) -> bool {
        self.jwt_key == DEFAULT_JWT_KEY
    }

    /// `HOST:PORT`, with `localhost` resolved to the loopback address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let host = if self.host.eq_ignore_ascii_case("localhost") {
            "127.0.0.1"
        } else {
            self.host.as_str()
        };
        format!("{host}:{}", self.port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT: {}:{}", self.host, self.port))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("database_url", &"[REDACTED]")
            .field("db_max_connections", &self.db_max_connections)
            .field("run_migrations", &self.run_migrations)
            .field("jwt_key", &"[REDACTED]")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("request_timeout", &self.request_timeout)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}
