mod agents;
mod app_config;
mod auth;
mod config;
pub mod images;
mod properties;
mod roommates;
mod universities;

pub use agents::DashboardStats;
pub use app_config::{AppConfig, Environment};
pub use auth::{AuthSession, UserSummary};
pub use config::{load_app_config, load_app_config_from_env};
pub use images::resolve_image_url;
pub use properties::{AgentSummary, Property, PropertyStatus};
pub use roommates::{NewRoommateRequest, RequestStatus, RoommateRequest};
pub use universities::University;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
