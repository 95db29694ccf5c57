use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CAMPUSNEST_ENV"));
}

#[test]
fn build_app_config_uses_fallbacks_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "http://localhost:5000/api");
    assert_eq!(cfg.backend_url, "http://localhost:5000");
    assert_eq!(cfg.socket_url, "http://localhost:5000");
    assert_eq!(cfg.storage_dir, PathBuf::from("./.campusnest"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_API_URL", "https://api.campusnest.app/v1/");
    map.insert("CAMPUSNEST_BACKEND_URL", "https://cdn.campusnest.app");
    map.insert("CAMPUSNEST_SOCKET_URL", "wss://rt.campusnest.app");
    map.insert("CAMPUSNEST_STORAGE_DIR", "/tmp/nest");
    map.insert("CAMPUSNEST_REQUEST_TIMEOUT_SECS", "5");
    map.insert("CAMPUSNEST_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://api.campusnest.app/v1");
    assert_eq!(cfg.backend_url, "https://cdn.campusnest.app");
    assert_eq!(cfg.socket_url, "wss://rt.campusnest.app");
    assert_eq!(cfg.storage_dir, PathBuf::from("/tmp/nest"));
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn build_app_config_rejects_api_url_without_scheme() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_API_URL", "localhost:5000/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAMPUSNEST_API_URL"),
        "expected InvalidEnvVar(CAMPUSNEST_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_ws_scheme_for_backend_url() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_BACKEND_URL", "ws://localhost:5000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAMPUSNEST_BACKEND_URL"),
        "expected InvalidEnvVar(CAMPUSNEST_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_scheme_without_host() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_SOCKET_URL", "wss://");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAMPUSNEST_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CAMPUSNEST_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("CAMPUSNEST_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}
