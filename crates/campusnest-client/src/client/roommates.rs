use campusnest_core::{NewRoommateRequest, RequestStatus, RoommateRequest};
use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct StatusUpdate {
    status: RequestStatus,
}

impl ApiClient {
    /// `GET /roommate/feed`: open requests from other students.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`], [`ApiError::Http`], or [`ApiError::Deserialize`]
    /// (including a status outside `PENDING`/`ACCEPTED`/`REJECTED`).
    pub async fn roommate_feed(&self) -> Result<Vec<RoommateRequest>, ApiError> {
        let builder = self.request(Method::GET, "roommate/feed")?;
        Self::send_json(builder, "GET /roommate/feed").await
    }

    /// `GET /roommate/my-requests`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::roommate_feed`].
    pub async fn my_roommate_requests(&self) -> Result<Vec<RoommateRequest>, ApiError> {
        let builder = self.request(Method::GET, "roommate/my-requests")?;
        Self::send_json(builder, "GET /roommate/my-requests").await
    }

    /// `POST /roommate/request`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::roommate_feed`].
    pub async fn send_roommate_request(
        &self,
        request: &NewRoommateRequest,
    ) -> Result<RoommateRequest, ApiError> {
        let builder = self.request(Method::POST, "roommate/request")?.json(request);
        Self::send_json(builder, "POST /roommate/request").await
    }

    /// `PATCH /roommate/request/:id` to accept or reject.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::roommate_feed`].
    pub async fn respond_roommate_request(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<RoommateRequest, ApiError> {
        let builder = self
            .record_request(Method::PATCH, "roommate/request", id)?
            .json(&StatusUpdate { status });
        Self::send_json(builder, &format!("PATCH /roommate/request/{id}")).await
    }
}
