use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Token signing secrets and lifetimes.
///
/// Access and refresh tokens use independent secrets and independent
/// expiries.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expiry_secs: i64,
    pub refresh_expiry_secs: i64,
}

/// Argon2id cost parameters, fixed process-wide.
#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
    pub output_len: usize,
}

impl From<&HashingConfig> for auth::HashingParams {
    fn from(config: &HashingConfig) -> Self {
        Self {
            memory_cost_kib: config.memory_cost_kib,
            time_cost: config.time_cost,
            parallelism: config.parallelism,
            output_len: config.output_len,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__ACCESS_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for expiries and hashing costs
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Access tokens 15 minutes, refresh tokens 7 days
            .set_default("jwt.access_expiry_secs", 15 * 60)?
            .set_default("jwt.refresh_expiry_secs", 7 * 24 * 60 * 60)?
            .set_default("hashing.memory_cost_kib", 19456)?
            .set_default("hashing.time_cost", 2)?
            .set_default("hashing.parallelism", 1)?
            .set_default("hashing.output_len", 32)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
