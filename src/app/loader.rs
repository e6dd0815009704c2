//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let env = std::env::var("PETPAL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = defaults()
        // External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{env}")).required(false))
        .add_source(File::with_name("config/local").required(false))
        // Environment variables (highest priority)
        .add_source(environment())
        .build()
        .context("Failed to build configuration")?;

    finish(config)
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

/// `PETPAL_MOOD__UNIT_MS=250` sets `mood.unit_ms`; one `_` after the prefix.
fn environment() -> Environment {
    Environment::with_prefix("PETPAL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(config: Config) -> Result<AppConfig> {
    let app: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;
    app.mood.validate().context("Invalid mood configuration")?;
    app.walk.validate().context("Invalid walk configuration")?;
    Ok(app)
}
