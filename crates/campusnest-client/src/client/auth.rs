use campusnest_core::AuthSession;
use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// `POST /auth/login`. Returns the token and user; persisting them is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] (401 on bad credentials), [`ApiError::Http`], or
    /// [`ApiError::Deserialize`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let builder = self
            .request(Method::POST, "auth/login")?
            .json(&Credentials { email, password });
        Self::send_json(builder, "POST /auth/login").await
    }
}
