use campusnest_core::{RequestStatus, RoommateRequest};
use rust_decimal::Decimal;

/// Filters for the roommate feed. Same counting rule as the property
/// filters: each non-default field counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoommateFilterStore {
    min_budget: Option<Decimal>,
    max_budget: Option<Decimal>,
    gender: Option<String>,
    university_id: Option<String>,
    status: Option<RequestStatus>,
}

impl RoommateFilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Either bound may be open. Reversed bounds are swapped.
    pub fn set_budget(&mut self, min: Option<Decimal>, max: Option<Decimal>) {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                self.min_budget = Some(hi);
                self.max_budget = Some(lo);
            }
            _ => {
                self.min_budget = min;
                self.max_budget = max;
            }
        }
    }

    /// Blank input clears the filter.
    pub fn set_gender(&mut self, gender: Option<&str>) {
        self.gender = non_blank(gender);
    }

    pub fn set_university(&mut self, university_id: Option<&str>) {
        self.university_id = non_blank(university_id);
    }

    pub fn set_status(&mut self, status: Option<RequestStatus>) {
        self.status = status;
    }

    #[must_use]
    pub fn budget(&self) -> (Option<Decimal>, Option<Decimal>) {
        (self.min_budget, self.max_budget)
    }

    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    #[must_use]
    pub fn university(&self) -> Option<&str> {
        self.university_id.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> Option<RequestStatus> {
        self.status
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.min_budget.is_some() || self.max_budget.is_some(),
            self.gender.is_some(),
            self.university_id.is_some(),
            self.status.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    #[must_use]
    pub fn matches(&self, request: &RoommateRequest) -> bool {
        if self.min_budget.is_some_and(|min| request.budget < min) {
            return false;
        }
        if self.max_budget.is_some_and(|max| request.budget > max) {
            return false;
        }
        if let Some(gender) = &self.gender {
            if !request
                .gender
                .as_deref()
                .is_some_and(|g| g.eq_ignore_ascii_case(gender))
            {
                return false;
            }
        }
        if let Some(university_id) = &self.university_id {
            if request.university_id.as_deref() != Some(university_id.as_str()) {
                return false;
            }
        }
        self.status.is_none_or(|s| request.status == s)
    }

    #[must_use]
    pub fn apply<'a>(&self, requests: &'a [RoommateRequest]) -> Vec<&'a RoommateRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, budget: i64, gender: &str, status: &str) -> RoommateRequest {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "requesterId": "s1",
            "status": status,
            "budget": budget,
            "gender": gender,
            "universityId": "unilag"
        }))
        .expect("fixture should deserialize")
    }

    #[test]
    fn defaults_match_everything() {
        let filters = RoommateFilterStore::new();
        assert_eq!(filters.active_count(), 0);
        assert!(filters.matches(&request("r1", 100, "female", "PENDING")));
    }

    #[test]
    fn budget_bounds_count_as_one_field() {
        let mut filters = RoommateFilterStore::new();
        filters.set_budget(Some(Decimal::from(100)), Some(Decimal::from(300)));
        assert_eq!(filters.active_count(), 1);
        filters.set_budget(None, Some(Decimal::from(300)));
        assert_eq!(filters.active_count(), 1);
        filters.set_budget(None, None);
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn reversed_budget_is_swapped() {
        let mut filters = RoommateFilterStore::new();
        filters.set_budget(Some(Decimal::from(500)), Some(Decimal::from(100)));
        assert_eq!(
            filters.budget(),
            (Some(Decimal::from(100)), Some(Decimal::from(500)))
        );
    }

    #[test]
    fn matches_applies_each_filter() {
        let r = request("r1", 250, "Female", "ACCEPTED");
        let mut filters = RoommateFilterStore::new();

        filters.set_budget(Some(Decimal::from(300)), None);
        assert!(!filters.matches(&r));
        filters.set_budget(Some(Decimal::from(200)), Some(Decimal::from(250)));
        assert!(filters.matches(&r));

        filters.set_gender(Some("male"));
        assert!(!filters.matches(&r));
        filters.set_gender(Some("female"));
        assert!(filters.matches(&r));

        filters.set_university(Some("unilag"));
        assert!(filters.matches(&r));
        filters.set_university(Some("ui"));
        assert!(!filters.matches(&r));
        filters.set_university(Some("  "));
        assert!(filters.matches(&r));

        filters.set_status(Some(RequestStatus::Pending));
        assert!(!filters.matches(&r));
        filters.set_status(Some(RequestStatus::Accepted));
        assert!(filters.matches(&r));

        assert_eq!(filters.active_count(), 3);
        filters.reset();
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn apply_filters_feed() {
        let feed = vec![
            request("a", 100, "male", "PENDING"),
            request("b", 400, "male", "PENDING"),
        ];
        let mut filters = RoommateFilterStore::new();
        filters.set_budget(None, Some(Decimal::from(200)));
        let kept: Vec<&str> = filters.apply(&feed).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(kept, ["a"]);
    }
}
