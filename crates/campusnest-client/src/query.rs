use rust_decimal::Decimal;
use serde::Serialize;

/// Query string for `GET /properties`.
///
/// List-valued filters travel comma-joined (`roomTypes=single,shared`) since
/// the backend splits them itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl PropertyQuery {
    #[must_use]
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_owned()),
            ..Self::default()
        }
    }

    /// Joins list values for the wire, `None` when the list is empty.
    #[must_use]
    pub fn join_list(values: &[String]) -> Option<String> {
        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }
}
