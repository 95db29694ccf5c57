//! Stores whose state mirrors a remote collection.

mod agent_property;
mod auth;
mod property;
mod roommate;
mod university;

pub use agent_property::{AgentPropertyState, AgentPropertyStore};
pub use auth::{AuthState, AuthStore, PersistedToken};
pub use property::{PropertyState, PropertyStore};
pub use roommate::{RoommateState, RoommateStore};
pub use university::{UniversityState, UniversityStore};
