use campusnest_core::Property;
use reqwest::Method;

use super::ApiClient;
use crate::draft::PropertyDraft;
use crate::error::ApiError;
use crate::query::PropertyQuery;

impl ApiClient {
    /// `GET /properties` with the given filters.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if a record does not decode, including an
    ///   `images` string that is not a JSON-encoded list.
    pub async fn list_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, ApiError> {
        let builder = self.request(Method::GET, "properties")?.query(query);
        Self::send_json(builder, "GET /properties").await
    }

    /// `GET /properties/:id`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_properties`]; a missing id is
    /// [`ApiError::Status`] with status 404. Returns [`ApiError::InvalidId`]
    /// without sending anything for an empty, `.` or `..` id.
    pub async fn get_property(&self, id: &str) -> Result<Property, ApiError> {
        let builder = self.record_request(Method::GET, "properties", id)?;
        Self::send_json(builder, &format!("GET /properties/{id}")).await
    }

    /// `POST /properties` as multipart form data.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidDraft`] without sending anything if the
    /// draft fails validation; otherwise as [`ApiClient::list_properties`].
    pub async fn create_property(&self, draft: &PropertyDraft) -> Result<Property, ApiError> {
        let form = draft.to_form()?;
        let builder = self.request(Method::POST, "properties")?.multipart(form);
        Self::send_json(builder, "POST /properties").await
    }

    /// `PUT /properties/:id` as multipart form data.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::create_property`].
    pub async fn update_property(
        &self,
        id: &str,
        draft: &PropertyDraft,
    ) -> Result<Property, ApiError> {
        let form = draft.to_form()?;
        let builder = self
            .record_request(Method::PUT, "properties", id)?
            .multipart(form);
        Self::send_json(builder, &format!("PUT /properties/{id}")).await
    }

    /// `DELETE /properties/:id`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] or [`ApiError::Http`].
    pub async fn delete_property(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.record_request(Method::DELETE, "properties", id)?;
        Self::send(builder, &format!("DELETE /properties/{id}")).await?;
        Ok(())
    }
}
