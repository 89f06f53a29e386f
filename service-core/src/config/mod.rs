use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Settings shared by every service: where to listen and how loudly to log.
///
/// `PORT` is read from the bare environment variable only and has no
/// default; a missing or unparsable value is a configuration error and the
/// service must not start. The logging settings layer, lowest precedence
/// first: an optional `configuration` file, `APP__*` variables, then the
/// bare `LOG_LEVEL` and `OTLP_ENDPOINT` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(skip_deserializing)]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("log_level", env::var("LOG_LEVEL").ok())?
            .set_override_option("otlp_endpoint", env::var("OTLP_ENDPOINT").ok())?
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.port = required_port()?;
        Ok(config)
    }
}

fn required_port() -> Result<u16, AppError> {
    let raw = env::var("PORT")
        .map_err(|_| AppError::ConfigError(anyhow::anyhow!("PORT is required but not set")))?;
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("PORT must be a port number, got {:?}: {}", raw, e))
    })
}
