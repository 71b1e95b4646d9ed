use signlearn_api::{inference::InferenceConfig, state::DatabaseConfig};
use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub inference: InferenceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            sqlx_logging: parse_or(&lookup, "DATABASE_LOGGING", false)?,
        };

        let base_url = lookup("INFERENCE_URL").ok_or(ConfigError::MissingVar("INFERENCE_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!("INFERENCE_URL: {}", base_url)));
        }

        let timeout_secs = parse_or(&lookup, "INFERENCE_TIMEOUT_SECS", DEFAULT_INFERENCE_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "INFERENCE_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        let inference = InferenceConfig::new(base_url)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_transport_retry(parse_or(&lookup, "INFERENCE_RETRY", false)?);

        Ok(Config {
            port,
            database,
            inference,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for: {0}")]
    InvalidValue(String),
}
