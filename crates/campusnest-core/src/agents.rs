use serde::{Deserialize, Serialize};

/// Headline numbers for the agent dashboard (`GET /agents/dashboard/stats`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_properties: u64,
    pub active_listings: u64,
    pub total_views: u64,
    pub pending_requests: u64,
}
