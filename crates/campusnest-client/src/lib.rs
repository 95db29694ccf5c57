pub mod client;
pub mod draft;
pub mod error;
pub mod query;
pub mod token;

pub use client::ApiClient;
pub use draft::{ImageUpload, PropertyDraft};
pub use error::ApiError;
pub use query::PropertyQuery;
pub use token::{StaticToken, TokenSource};
