//! Configuration module for the Gloria backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Default endpoint for the hosted language model.
pub const DEFAULT_COMPANION_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret that opens the admin session gate
    pub admin_password: String,
    /// Path to SQLite database file backing the durable key-value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether deleting the last item of a collection persists an empty collection
    pub persist_empty: bool,
    /// Simulated network delay for form submissions
    pub submit_delay: Duration,
    /// How long the contact form shows its success state before going idle
    pub success_display: Duration,
    /// API key for the hosted language model (companion disabled when absent)
    pub companion_api_key: Option<String>,
    /// Model name used by the companion
    pub companion_model: String,
    /// Base endpoint of the hosted language model
    pub companion_endpoint: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails on a malformed bind address; runs before logging is set up.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let admin_password =
            env::var("GLORIA_ADMIN_PASSWORD").unwrap_or_else(|_| "1234".to_string());

        let db_path = env::var("GLORIA_DB_PATH")
            .unwrap_or_else(|_| "./data/gloria.sqlite".to_string())
            .into();

        let bind_addr = parse_bind_addr(env::var("GLORIA_BIND_ADDR").ok().as_deref())?;

        let log_level = env::var("GLORIA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let persist_empty = env::var("GLORIA_PERSIST_EMPTY")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let submit_delay = Duration::from_millis(millis_from_env("GLORIA_SUBMIT_DELAY_MS", 1500));
        let success_display =
            Duration::from_millis(millis_from_env("GLORIA_SUCCESS_DISPLAY_MS", 5000));

        let companion_api_key = env::var("GLORIA_COMPANION_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let companion_model = env::var("GLORIA_COMPANION_MODEL")
            .unwrap_or_else(|_| "gemini-3-flash-preview".to_string());

        let companion_endpoint = env::var("GLORIA_COMPANION_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_COMPANION_ENDPOINT.to_string());

        Ok(Self {
            admin_password,
            db_path,
            bind_addr,
            log_level,
            persist_empty,
            submit_delay,
            success_display,
            companion_api_key,
            companion_model,
            companion_endpoint,
        })
    }
}

/// Parse the bind address, defaulting to `127.0.0.1:8080` when unset.
fn parse_bind_addr(raw: Option<&str>) -> Result<SocketAddr, AppError> {
    match raw {
        None => Ok(SocketAddr::from(([127, 0, 0, 1], 8080))),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::Validation(format!("Invalid GLORIA_BIND_ADDR format: {:?}", raw))
        }),
    }
}

fn millis_from_env(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
