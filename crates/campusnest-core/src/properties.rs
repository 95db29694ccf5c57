use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::images;

/// Listing availability as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    #[default]
    Available,
    Occupied,
    Pending,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

impl PropertyStatus {
    /// The backend's spelling, as sent in form fields.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            PropertyStatus::Available => "AVAILABLE",
            PropertyStatus::Occupied => "OCCUPIED",
            PropertyStatus::Pending => "PENDING",
            PropertyStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyStatus::Available => write!(f, "available"),
            PropertyStatus::Occupied => write!(f, "occupied"),
            PropertyStatus::Pending => write!(f, "pending"),
            PropertyStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// The agent embedded in property detail responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Monthly rent.
    pub price: Decimal,
    #[serde(default)]
    pub location: String,
    /// Backend-relative image paths, in display order.
    #[serde(default, deserialize_with = "images::deserialize")]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: PropertyStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub agent: Option<AgentSummary>,
    #[serde(default)]
    pub university_id: Option<String>,
    /// e.g. `"single"`, `"shared"`, `"self-contained"`.
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub furnished: Option<bool>,
    /// Distance to the linked university campus.
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == PropertyStatus::Available
    }

    /// The owning agent's id, from either the flat field or the embedded summary.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.agent_id
            .as_deref()
            .or_else(|| self.agent.as_ref().map(|a| a.id.as_str()))
    }

    /// Image paths resolved against the backend origin, in display order.
    #[must_use]
    pub fn image_urls(&self, backend_base: &str) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|p| images::resolve_image_url(backend_base, p))
            .collect()
    }

    /// First displayable image, used as the listing thumbnail.
    #[must_use]
    pub fn cover_image(&self, backend_base: &str) -> Option<String> {
        self.images
            .iter()
            .find_map(|p| images::resolve_image_url(backend_base, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_json(images: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "p1",
            "title": "Studio near North Gate",
            "price": 450,
            "location": "Samaru",
            "images": images,
            "status": "AVAILABLE",
            "agentId": "a1"
        })
    }

    #[test]
    fn deserializes_array_images() {
        let p: Property =
            serde_json::from_value(listing_json(serde_json::json!(["/u/1.jpg", "/u/2.jpg"])))
                .unwrap();
        assert_eq!(p.images, vec!["/u/1.jpg", "/u/2.jpg"]);
        assert_eq!(p.price, Decimal::from(450));
    }

    #[test]
    fn deserializes_string_encoded_images_in_order() {
        let encoded = serde_json::json!("[\"/u/2.jpg\",\"/u/1.jpg\"]");
        let p: Property = serde_json::from_value(listing_json(encoded)).unwrap();
        assert_eq!(p.images, vec!["/u/2.jpg", "/u/1.jpg"]);
    }

    #[test]
    fn missing_or_null_images_become_empty() {
        let p: Property = serde_json::from_value(listing_json(serde_json::Value::Null)).unwrap();
        assert!(p.images.is_empty());

        let mut raw = listing_json(serde_json::Value::Null);
        raw.as_object_mut().unwrap().remove("images");
        let p: Property = serde_json::from_value(raw).unwrap();
        assert!(p.images.is_empty());
    }

    #[test]
    fn malformed_image_string_is_a_payload_error() {
        let result: Result<Property, _> =
            serde_json::from_value(listing_json(serde_json::json!("not json")));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_status_maps_to_unknown() {
        let mut raw = listing_json(serde_json::json!([]));
        raw["status"] = serde_json::json!("ARCHIVED");
        let p: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(p.status, PropertyStatus::Unknown);
        assert!(!p.is_available());
    }

    #[test]
    fn owner_id_falls_back_to_embedded_agent() {
        let mut raw = listing_json(serde_json::json!([]));
        raw.as_object_mut().unwrap().remove("agentId");
        raw["agent"] = serde_json::json!({ "id": "a9", "name": "Ada" });
        let p: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(p.owner_id(), Some("a9"));
    }

    #[test]
    fn cover_image_resolves_first_path() {
        let p: Property =
            serde_json::from_value(listing_json(serde_json::json!(["", "uploads/c.jpg"])))
                .unwrap();
        assert_eq!(
            p.cover_image("http://localhost:5000").as_deref(),
            Some("http://localhost:5000/uploads/c.jpg")
        );
        assert_eq!(p.image_urls("http://localhost:5000").len(), 1);
    }
}
