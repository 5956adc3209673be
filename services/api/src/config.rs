//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_COACH_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";

pub const DEFAULT_COACH_MODEL: &str = "gemini-3-flash-preview";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub allowed_origin: HeaderValue,
    /// Absent keys are tolerated; every coach call then falls back to the
    /// connection error reply.
    pub gemini_api_key: Option<String>,
    pub coach_api_base: String,
    pub coach_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin_str =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());
        let allowed_origin = allowed_origin_str.parse::<HeaderValue>().map_err(|e| {
            ConfigError::InvalidValue("ALLOWED_ORIGIN".to_string(), e.to_string())
        })?;

        // --- Coach Service Settings ---
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let coach_api_base =
            lookup("COACH_API_BASE").unwrap_or_else(|| DEFAULT_COACH_API_BASE.to_string());
        if coach_api_base.trim().is_empty() {
            return Err(ConfigError::MissingVar("COACH_API_BASE".to_string()));
        }
        let coach_model = lookup("COACH_MODEL").unwrap_or_else(|| DEFAULT_COACH_MODEL.to_string());

        Ok(Self {
            bind_address,
            log_level,
            allowed_origin,
            gemini_api_key,
            coach_api_base,
            coach_model,
        })
    }
}
