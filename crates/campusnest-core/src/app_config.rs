use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the marketplace client.
///
/// The three URLs are the externally supplied endpoints: the REST API base,
/// the backend origin that serves uploaded assets, and the realtime socket.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub backend_url: String,
    pub socket_url: String,
    /// Directory backing the persisted client storage.
    pub storage_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
}
