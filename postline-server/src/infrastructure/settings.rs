use std::net::SocketAddr;

use anyhow::{Context, Result, bail};

const MIN_SECRET_CHARS: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database_url: String,
    pub(crate) jwt_secret: String,
    pub(crate) jwt_ttl_seconds: i64,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_filter: String,
    pub(crate) body_limit_bytes: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let database_url = required("DATABASE_URL")?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.chars().count() < MIN_SECRET_CHARS {
            bail!("JWT_SECRET must be at least {MIN_SECRET_CHARS} characters");
        }

        let jwt_ttl_seconds = optional("JWT_TTL_SECONDS")
            .map(|raw| {
                raw.parse::<i64>()
                    .context("JWT_TTL_SECONDS must be an integer")
            })
            .transpose()?
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if jwt_ttl_seconds <= 0 {
            bail!("JWT_TTL_SECONDS must be positive");
        }

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let cors_origins = optional("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let log_filter = optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let body_limit_bytes = optional("BODY_LIMIT_BYTES")
            .map(|raw| {
                raw.parse::<usize>()
                    .context("BODY_LIMIT_BYTES must be a positive integer")
            })
            .transpose()?
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        if body_limit_bytes == 0 {
            bail!("BODY_LIMIT_BYTES must be > 0");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_seconds,
            bind_addr,
            cors_origins,
            log_filter,
            body_limit_bytes,
        })
    }
}

fn required(key: &str) -> Result<String> {
    optional(key).with_context(|| format!("{key} is required"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
