use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_CONFIG_DIR: &str = "./configs/sites";
pub const DEFAULT_USER_AGENT: &str = "kyujin/0.1 (job-posting-extractor)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let config_dir = PathBuf::from(or_default("KYUJIN_CONFIG_DIR", DEFAULT_CONFIG_DIR));
    let log_level = or_default("KYUJIN_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("KYUJIN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("KYUJIN_USER_AGENT", DEFAULT_USER_AGENT);

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KYUJIN_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    Ok(AppConfig {
        config_dir,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
