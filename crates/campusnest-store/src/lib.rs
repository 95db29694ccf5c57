//! Client-side state for the student-housing marketplace.
//!
//! Domain stores mirror a remote collection and never raise past their own
//! boundary: failures land in the store's `status.error` and mutations report
//! success as a `bool`. Local stores hold browser-style persisted state with
//! no server counterpart.

pub mod booking;
pub mod cell;
pub mod domain;
pub mod local;
pub mod payment;
pub mod storage;

pub use booking::{Booking, BookingStore};
pub use cell::{LoadStatus, StoreCell, Tracked};
pub use domain::{
    AgentPropertyState, AgentPropertyStore, AuthState, AuthStore, PersistedToken, PropertyState,
    PropertyStore, RoommateState, RoommateStore, UniversityState, UniversityStore,
};
pub use local::{
    FavoritesStore, FilterStore, Furnished, PriceRange, RoommateFilterStore, ViewHistoryStore,
};
pub use payment::{
    quote, CardDetails, LeaseDuration, PaymentError, PaymentMethod, PaymentStage, PaymentStore,
    Quote, Receipt, ReceiptView,
};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
