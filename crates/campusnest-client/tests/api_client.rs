//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use std::sync::Arc;

use campusnest_client::{ApiClient, ApiError, PropertyDraft, PropertyQuery, StaticToken};
use campusnest_core::{NewRoommateRequest, RequestStatus};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anonymous_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, Arc::new(StaticToken::default()))
        .expect("client construction should not fail")
}

fn signed_in_client(base_url: &str) -> ApiClient {
    ApiClient::new(
        base_url,
        5,
        Arc::new(StaticToken(Some("jwt-abc".to_string()))),
    )
    .expect("client construction should not fail")
}

fn property_json(id: &str, images: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Two-bed flat by the South Gate",
        "description": "Quiet, tiled, prepaid meter",
        "price": 520.5,
        "location": "Bodija",
        "images": images,
        "status": "AVAILABLE",
        "views": 12,
        "agentId": "agent-1",
        "roomType": "shared",
        "amenities": ["wifi", "water"],
        "furnished": true
    })
}

#[tokio::test]
async fn list_properties_decodes_string_encoded_images() {
    let server = MockServer::start().await;

    let body = json!([
        property_json("p1", json!("[\"/uploads/1.jpg\",\"/uploads/2.jpg\"]")),
        property_json("p2", json!(["/uploads/3.jpg"])),
    ]);

    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let properties = client
        .list_properties(&PropertyQuery::default())
        .await
        .expect("should parse properties");

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].images, vec!["/uploads/1.jpg", "/uploads/2.jpg"]);
    assert_eq!(properties[1].images, vec!["/uploads/3.jpg"]);
    assert_eq!(properties[0].price, Decimal::new(5205, 1));
}

#[tokio::test]
async fn list_properties_sends_filters_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .and(query_param("search", "bodija"))
        .and(query_param("minPrice", "100"))
        .and(query_param("roomTypes", "single,shared"))
        .and(query_param("furnished", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let query = PropertyQuery {
        search: Some("bodija".to_string()),
        min_price: Some(Decimal::from(100)),
        room_types: PropertyQuery::join_list(&["single".to_string(), "shared".to_string()]),
        furnished: Some(true),
        ..PropertyQuery::default()
    };

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let properties = client.list_properties(&query).await.expect("should match");
    assert!(properties.is_empty());
}

#[tokio::test]
async fn get_property_unwraps_data_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/properties/p1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": property_json("p1", json!(null)) })),
        )
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let property = client.get_property("p1").await.expect("should parse");
    assert_eq!(property.id, "p1");
    assert!(property.images.is_empty());
    assert_eq!(property.views, 12);
}

#[tokio::test]
async fn requests_carry_bearer_token_when_signed_in() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/agents/dashboard/stats"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalProperties": 4,
            "activeListings": 3,
            "totalViews": 210
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&format!("{}/api", server.uri()));
    let stats = client.dashboard_stats().await.expect("should parse stats");
    assert_eq!(stats.total_properties, 4);
    assert_eq!(stats.active_listings, 3);
    assert_eq!(stats.total_views, 210);
    assert_eq!(stats.pending_requests, 0);
}

#[tokio::test]
async fn anonymous_requests_have_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/university"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "u1", "name": "University of Ibadan", "abbreviation": "UI", "location": "Ibadan" }
        ])))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let universities = client.list_universities().await.expect("should parse");
    assert_eq!(universities[0].short_name(), "UI");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn non_success_status_carries_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/properties/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Property not found" })),
        )
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let err = client.get_property("missing").await.unwrap_err();
    assert!(
        matches!(err, ApiError::Status { status: 404, ref message } if message == "Property not found"),
        "expected Status(404), got: {err:?}"
    );
    assert_eq!(err.to_string(), "Property not found (HTTP 404)");
}

#[tokio::test]
async fn server_error_without_json_uses_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roommate/feed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let err = client.roommate_feed().await.unwrap_err();
    assert!(
        matches!(err, ApiError::Status { status: 500, ref message } if message == "Internal Server Error"),
        "expected Status(500), got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let err = client
        .list_properties(&PropertyQuery::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn roommate_status_outside_closed_set_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/roommate/my-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "r1",
            "requesterId": "s1",
            "status": "WITHDRAWN",
            "budget": 200
        }])))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let err = client.my_roommate_requests().await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialize { .. }));
}

#[tokio::test]
async fn send_roommate_request_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/roommate/request"))
        .and(body_json(json!({
            "propertyId": "p1",
            "budget": 250.0,
            "preferences": ["quiet"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "r9",
            "requesterId": "s1",
            "propertyId": "p1",
            "status": "PENDING",
            "budget": 250,
            "preferences": ["quiet"]
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&format!("{}/api", server.uri()));
    let created = client
        .send_roommate_request(&NewRoommateRequest {
            property_id: Some("p1".to_string()),
            budget: Decimal::from(250),
            preferences: vec!["quiet".to_string()],
            message: None,
        })
        .await
        .expect("should create request");
    assert_eq!(created.id, "r9");
    assert_eq!(created.status, RequestStatus::Pending);
}

#[tokio::test]
async fn respond_roommate_request_patches_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/roommate/request/r9"))
        .and(body_json(json!({ "status": "ACCEPTED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r9",
            "requesterId": "s1",
            "status": "ACCEPTED",
            "budget": 250
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&format!("{}/api", server.uri()));
    let updated = client
        .respond_roommate_request("r9", RequestStatus::Accepted)
        .await
        .expect("should update");
    assert_eq!(updated.status, RequestStatus::Accepted);
}

#[tokio::test]
async fn create_property_sends_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/properties"))
        .and(header_exists("content-type"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(property_json("p7", json!("[\"/u/7.jpg\"]"))),
        )
        .mount(&server)
        .await;

    let draft = PropertyDraft {
        title: "Single room, Agbowo".to_string(),
        location: "Agbowo".to_string(),
        price: Decimal::from(150),
        ..PropertyDraft::default()
    };

    let client = signed_in_client(&format!("{}/api", server.uri()));
    let created = client.create_property(&draft).await.expect("should create");
    assert_eq!(created.id, "p7");
    assert_eq!(created.images, vec!["/u/7.jpg"]);

    let requests = server.received_requests().await.expect("recording enabled");
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "expected multipart body, got: {content_type}"
    );
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_sending() {
    let server = MockServer::start().await;

    let client = signed_in_client(&format!("{}/api", server.uri()));
    let err = client
        .create_property(&PropertyDraft::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidDraft(_)));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn delete_property_ignores_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/properties/p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = signed_in_client(&format!("{}/api", server.uri()));
    client.delete_property("p1").await.expect("should delete");
}

#[tokio::test]
async fn login_returns_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@ui.edu.ng", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-new",
            "user": { "id": "s1", "name": "Ada", "role": "STUDENT" }
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let session = client
        .login("ada@ui.edu.ng", "hunter2")
        .await
        .expect("should log in");
    assert_eq!(session.token, "jwt-new");
    assert!(!session.is_agent());
}

#[tokio::test]
async fn record_ids_stay_inside_their_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/agents/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "stats" })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/properties/..%2Fagents%2Fdashboard%2Fstats%3Fx=1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Property not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&format!("{}/api", server.uri()));
    let err = client
        .get_property("../agents/dashboard/stats?x=1")
        .await
        .expect_err("odd id should not resolve to another endpoint");
    assert!(matches!(err, ApiError::Status { status: 404, .. }), "got: {err:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn dot_segment_ids_are_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = signed_in_client(&format!("{}/api", server.uri()));

    let err = client.delete_property("..").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidId(ref id) if id == ".."));
    let err = client
        .respond_roommate_request(".", RequestStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidId(_)));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}
