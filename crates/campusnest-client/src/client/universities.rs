use campusnest_core::University;
use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /university`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`], [`ApiError::Http`], or [`ApiError::Deserialize`].
    pub async fn list_universities(&self) -> Result<Vec<University>, ApiError> {
        let builder = self.request(Method::GET, "university")?;
        Self::send_json(builder, "GET /university").await
    }
}
