use campusnest_core::{DashboardStats, Property};
use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /agents/properties`: listings owned by the signed-in agent.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] (401 when not signed in as an agent),
    /// [`ApiError::Http`], or [`ApiError::Deserialize`].
    pub async fn list_agent_properties(&self) -> Result<Vec<Property>, ApiError> {
        let builder = self.request(Method::GET, "agents/properties")?;
        Self::send_json(builder, "GET /agents/properties").await
    }

    /// `GET /agents/dashboard/stats`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_agent_properties`].
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let builder = self.request(Method::GET, "agents/dashboard/stats")?;
        Self::send_json(builder, "GET /agents/dashboard/stats").await
    }
}
