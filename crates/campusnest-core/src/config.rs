use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub(crate) const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub(crate) const DEFAULT_SOCKET_URL: &str = "http://localhost:5000";

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a supplied value is invalid. Every variable has a
/// fallback, so a missing variable is never an error.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a supplied value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let env = parse_environment(&or_default("CAMPUSNEST_ENV", "development"))?;

    let api_base_url = parse_url(
        "CAMPUSNEST_API_URL",
        &or_default("CAMPUSNEST_API_URL", DEFAULT_API_URL),
        &["http://", "https://"],
    )?;
    let backend_url = parse_url(
        "CAMPUSNEST_BACKEND_URL",
        &or_default("CAMPUSNEST_BACKEND_URL", DEFAULT_BACKEND_URL),
        &["http://", "https://"],
    )?;
    let socket_url = parse_url(
        "CAMPUSNEST_SOCKET_URL",
        &or_default("CAMPUSNEST_SOCKET_URL", DEFAULT_SOCKET_URL),
        &["http://", "https://", "ws://", "wss://"],
    )?;

    let storage_dir = PathBuf::from(or_default("CAMPUSNEST_STORAGE_DIR", "./.campusnest"));
    let request_timeout_secs = parse_u64("CAMPUSNEST_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAMPUSNEST_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let log_level = or_default("CAMPUSNEST_LOG_LEVEL", "info");

    Ok(AppConfig {
        env,
        api_base_url,
        backend_url,
        socket_url,
        storage_dir,
        request_timeout_secs,
        log_level,
    })
}

/// Validate a URL-valued variable and strip any trailing slash.
fn parse_url(var: &str, raw: &str, schemes: &[&str]) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let Some(scheme) = schemes.iter().find(|s| trimmed.starts_with(**s)) else {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{trimmed}' must start with one of {}", schemes.join(", ")),
        });
    };
    if trimmed.len() == scheme.len() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{trimmed}' has no host"),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CAMPUSNEST_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
