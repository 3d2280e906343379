use std::{env, str::FromStr};

use thiserror::Error;

/// Default listen address of the mock API
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid APP_ENV value '{0}', expected 'development' or 'production'")]
    InvalidEnvironment(String),
}

/// Deployment environment, drives log formatting
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub env: Environment,
    pub bind_addr: String,
    /// When set, every `/api` request must carry this value in `x-api-key`
    pub api_key: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_key: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Read the configuration from the process environment.
    ///
    /// Every variable is optional:
    /// - `APP_ENV`: `development` (default) or `production`
    /// - `UMS_BIND_ADDR`: listen address, defaults to [`DEFAULT_BIND_ADDR`]
    /// - `UMS_API_KEY`: shared key clients must send
    /// - `ALLOWED_ORIGINS`: comma separated CORS origins, permissive when empty
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        Ok(Self {
            env,
            bind_addr: env::var("UMS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            api_key: env::var("UMS_API_KEY").ok().filter(|key| !key.trim().is_empty()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
