use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::constants::DEFAULT_MAX_UPLOAD_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub server_selection_timeout: Duration,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 = try_load(&lookup, "MONGODB_TIMEOUT_SECS", "10")?;
        let upload_dir: String = try_load(&lookup, "UPLOAD_DIR", "uploads")?;

        Ok(Self {
            port: try_load(&lookup, "PORT", "8000")?,
            mongodb_uri: try_load(&lookup, "MONGODB_URI", "mongodb://localhost:27017")?,
            database_name: try_load(&lookup, "MONGODB_DB", "emogo_data")?,
            server_selection_timeout: Duration::from_secs(timeout_secs),
            upload_dir: PathBuf::from(upload_dir),
            max_upload_bytes: try_load(
                &lookup,
                "MAX_UPLOAD_SIZE",
                &DEFAULT_MAX_UPLOAD_SIZE.to_string(),
            )?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "emogo_data");
        assert_eq!(config.server_selection_timeout, Duration::from_secs(10));
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_SIZE);
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DB", "test_db"),
            ("UPLOAD_DIR", "/data/videos"),
            ("MAX_UPLOAD_SIZE", "1024"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.database_name, "test_db");
        assert_eq!(config.upload_dir, PathBuf::from("/data/videos"));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
