//! Bearer-token lookup seam.
//!
//! The client reads the token on every request instead of caching it, so a
//! login or logout performed through the persisted auth store takes effect on
//! the very next call.

/// Supplies the bearer token attached to outgoing requests.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, or none. Used for anonymous clients and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}
