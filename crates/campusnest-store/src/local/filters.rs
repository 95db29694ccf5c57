//! Property search filters.
//!
//! Every field is set independently. [`FilterStore::active_count`] compares
//! the current values to the defaults on each call; a field counts once no
//! matter how many values it holds.

use campusnest_client::PropertyQuery;
use campusnest_core::Property;
use rust_decimal::Decimal;

/// Inclusive monthly price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// The unfiltered range.
    pub const DEFAULT: PriceRange = PriceRange {
        min: Decimal::ZERO,
        max: Decimal::from_parts(1_000_000, 0, 0, false, 0),
    };

    /// Builds a range, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(a: Decimal, b: Decimal) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tri-state furnished filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Furnished {
    #[default]
    Any,
    Yes,
    No,
}

impl Furnished {
    fn as_query(self) -> Option<bool> {
        match self {
            Furnished::Any => None,
            Furnished::Yes => Some(true),
            Furnished::No => Some(false),
        }
    }
}

/// Highest rating a listing can carry.
const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    price_range: PriceRange,
    room_types: Vec<String>,
    amenities: Vec<String>,
    max_distance_km: Option<f64>,
    min_rating: f64,
    furnished: Furnished,
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    #[must_use]
    pub fn room_types(&self) -> &[String] {
        &self.room_types
    }

    #[must_use]
    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    #[must_use]
    pub fn max_distance_km(&self) -> Option<f64> {
        self.max_distance_km
    }

    #[must_use]
    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    #[must_use]
    pub fn furnished(&self) -> Furnished {
        self.furnished
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
    }

    pub fn set_room_types(&mut self, room_types: Vec<String>) {
        self.room_types = normalize_set(room_types);
    }

    pub fn toggle_room_type(&mut self, room_type: &str) {
        toggle_in(&mut self.room_types, room_type);
    }

    pub fn set_amenities(&mut self, amenities: Vec<String>) {
        self.amenities = normalize_set(amenities);
    }

    pub fn toggle_amenity(&mut self, amenity: &str) {
        toggle_in(&mut self.amenities, amenity);
    }

    /// `None` removes the cap. Negative or non-finite distances are ignored.
    pub fn set_max_distance_km(&mut self, km: Option<f64>) {
        self.max_distance_km = km.filter(|d| d.is_finite() && *d >= 0.0);
    }

    /// Clamped to `0..=5`; `0` means any rating.
    pub fn set_min_rating(&mut self, rating: f64) {
        self.min_rating = if rating.is_finite() {
            rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        };
    }

    pub fn set_furnished(&mut self, furnished: Furnished) {
        self.furnished = furnished;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of fields that differ from their defaults.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.price_range != PriceRange::DEFAULT,
            !self.room_types.is_empty(),
            !self.amenities.is_empty(),
            self.max_distance_km.is_some(),
            self.min_rating > 0.0,
            self.furnished != Furnished::Any,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Client-side check of one listing against every active filter.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        if !self.price_range.contains(property.price) {
            return false;
        }

        if !self.room_types.is_empty() {
            let Some(room_type) = property.room_type.as_deref() else {
                return false;
            };
            if !self
                .room_types
                .iter()
                .any(|r| r.eq_ignore_ascii_case(room_type))
            {
                return false;
            }
        }

        let has_all_amenities = self.amenities.iter().all(|wanted| {
            property
                .amenities
                .iter()
                .any(|a| a.eq_ignore_ascii_case(wanted))
        });
        if !has_all_amenities {
            return false;
        }

        if let Some(cap) = self.max_distance_km {
            if !property.distance_km.is_some_and(|d| d <= cap) {
                return false;
            }
        }

        if self.min_rating > 0.0 && !property.rating.is_some_and(|r| r >= self.min_rating) {
            return false;
        }

        match self.furnished.as_query() {
            None => true,
            Some(wanted) => property.furnished == Some(wanted),
        }
    }

    /// Listings from `properties` that pass [`FilterStore::matches`], in order.
    #[must_use]
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }

    /// The active filters as server-side query parameters. Default-valued
    /// fields are left out.
    #[must_use]
    pub fn to_query(&self) -> PropertyQuery {
        let price_active = self.price_range != PriceRange::DEFAULT;
        PropertyQuery {
            min_price: price_active.then_some(self.price_range.min),
            max_price: price_active.then_some(self.price_range.max),
            room_types: PropertyQuery::join_list(&self.room_types),
            amenities: PropertyQuery::join_list(&self.amenities),
            furnished: self.furnished.as_query(),
            max_distance: self.max_distance_km,
            min_rating: (self.min_rating > 0.0).then_some(self.min_rating),
            ..PropertyQuery::default()
        }
    }
}

/// Trims, drops blanks, and removes case-insensitive duplicates, keeping
/// first-seen order.
fn normalize_set(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() || out.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            continue;
        }
        out.push(value.to_owned());
    }
    out
}

fn toggle_in(values: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    let before = values.len();
    values.retain(|v| !v.eq_ignore_ascii_case(value));
    if values.len() == before {
        values.push(value.to_owned());
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
