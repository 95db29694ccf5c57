//! Client-only stores with no server counterpart.

mod favorites;
mod filters;
mod history;
mod roommate_filters;

pub use favorites::FavoritesStore;
pub use filters::{FilterStore, Furnished, PriceRange};
pub use history::ViewHistoryStore;
pub use roommate_filters::RoommateFilterStore;
