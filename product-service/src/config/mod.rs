use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ProductConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    /// Overrides the database named in the URI.
    pub database: Option<String>,
}

impl ProductConfig {
    /// Load configuration from the environment.
    ///
    /// `MONGODB_URI` and `PORT` are both required; neither has a default.
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, an optional configuration file, PORT and LOG_LEVEL
        let common = core_config::Config::load().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Please provide MONGODB_URI and PORT environment variables ({})",
                e.message()
            ))
        })?;

        Ok(ProductConfig {
            common,
            mongodb: MongoConfig {
                uri: Secret::new(require_env("MONGODB_URI")?),
                database: env::var("MONGODB_DATABASE").ok().filter(|db| !db.is_empty()),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "Please provide MONGODB_URI and PORT environment variables ({} is required but not set)",
            key
        ))),
    }
}
