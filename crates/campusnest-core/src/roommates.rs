use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a roommate request. Closed set: any other wire value is
/// rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "PENDING"),
            RequestStatus::Accepted => write!(f, "ACCEPTED"),
            RequestStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "ACCEPTED" => Ok(RequestStatus::Accepted),
            "REJECTED" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoommateRequest {
    pub id: String,
    pub requester_id: String,
    #[serde(default)]
    pub requester: Option<crate::UserSummary>,
    #[serde(default)]
    pub property_id: Option<String>,
    pub status: RequestStatus,
    pub budget: Decimal,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /roommate/request`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoommateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub budget: Decimal,
    pub preferences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
