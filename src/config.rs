//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the IssueHub API
    pub api_url: String,
    /// Override for the token file location (defaults to the user config dir)
    pub token_file: Option<PathBuf>,
    /// Login name for the smoke binary's credential fallback
    pub username: Option<String>,
    /// Password for the smoke binary's credential fallback
    pub password: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            token_file: None,
            username: None,
            password: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("ISSUEHUB_API_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("ISSUEHUB_API_URL"));
        }

        let username = env::var("ISSUEHUB_USERNAME").ok();
        let password = env::var("ISSUEHUB_PASSWORD").ok();

        // Credentials only make sense as a pair
        if username.is_some() && password.is_none() {
            return Err(ConfigError::Missing("ISSUEHUB_PASSWORD"));
        }
        if password.is_some() && username.is_none() {
            return Err(ConfigError::Missing("ISSUEHUB_USERNAME"));
        }

        Ok(Self {
            api_url,
            token_file: env::var("ISSUEHUB_TOKEN_FILE").ok().map(PathBuf::from),
            username,
            password,
        })
    }

    /// Username/password pair when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) => Some((u, p)),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
