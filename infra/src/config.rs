//! Configuration loading for the RoomRent backend
//!
//! Sources, from lowest to highest precedence:
//! - Built-in defaults for the detected environment
//! - `config/<environment>.toml`, when present
//! - `RR__`-prefixed environment variables (`RR__OTP__TTL_SECONDS=300`)

use ::config::{Config, Environment as EnvSource, File};
use rr_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix shared by all configuration environment variables
pub const ENV_PREFIX: &str = "RR";

/// Load configuration for the environment named by `ENVIRONMENT`.
///
/// Reads `.env` first so that both the environment name and `RR__`
/// overrides can come from it.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    load_config_for(environment)
}

/// Load configuration for an explicit environment
pub fn load_config_for(environment: Environment) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::for_environment(environment);

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .with_list_parse_key("directory.seed_users"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;

    tracing::debug!(
        environment = %config.environment,
        email_provider = %config.email.provider,
        directory_provider = %config.directory.provider,
        "Configuration loaded"
    );

    Ok(config)
}

/// Checks the provider settings that cannot be defaulted
fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.environment.is_production()
        && (config.email.provider == "mock" || config.directory.provider == "memory")
    {
        return Err(InfrastructureError::Config(
            "production requires real email and directory providers (resend, appwrite)"
                .to_string(),
        ));
    }
    if config.email.provider == "resend" && config.email.api_key.is_empty() {
        return Err(InfrastructureError::Config(
            "RR__EMAIL__API_KEY is required for the resend provider".to_string(),
        ));
    }
    if config.directory.provider == "appwrite"
        && (config.directory.project_id.is_empty() || config.directory.api_key.is_empty())
    {
        return Err(InfrastructureError::Config(
            "RR__DIRECTORY__PROJECT_ID and RR__DIRECTORY__API_KEY are required for the appwrite provider"
                .to_string(),
        ));
    }
    Ok(())
}
