//! HTTP tests driving the router against an in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_lib::config::ApiConfig;
use api_lib::routes::create_router;
use api_lib::state::AppState;

// =============================================================================
// Helpers
// =============================================================================

async fn test_state() -> AppState {
    api_lib::build_state(&ApiConfig::default())
        .await
        .expect("in-memory state")
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ann() -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": "ann@x.com",
        "phoneNumber": "123456789"
    })
}

fn numbered(n: usize) -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": format!("ann{}@x.com", n),
        "phoneNumber": format!("{:09}", n)
    })
}

// =============================================================================
// Create / Get
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = create_router(test_state().await);

    let response = send(&app, "POST", "/users", Some(ann())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(location, format!("/users/{}", id));

    let response = send(&app, "GET", &location, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(response).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["firstName"], "Ann");
    assert_eq!(fetched["phoneNumber"], "123456789");
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = create_router(test_state().await);
    let client_id = "00000000-0000-0000-0000-000000000001";

    let mut body = ann();
    body["id"] = json!(client_id);

    let created = json_body(send(&app, "POST", "/users", Some(body)).await).await;
    assert_ne!(created["id"], client_id);
}

#[tokio::test]
async fn test_create_invalid_lists_every_message() {
    let app = create_router(test_state().await);

    let body = json!({
        "firstName": "",
        "lastName": "Lee",
        "email": "bad",
        "phoneNumber": "12"
    });
    let response = send(&app, "POST", "/users", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let messages = json_body(response).await;
    assert_eq!(
        messages,
        json!([
            "First name is required",
            "Email is not a valid email address",
            "Phone number must be exactly 9 characters"
        ])
    );

    let users = json_body(send(&app, "GET", "/users", None).await).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_create_duplicate_email_is_rejected() {
    let app = create_router(test_state().await);
    send(&app, "POST", "/users", Some(ann())).await;

    let mut clash = ann();
    clash["phoneNumber"] = json!("987654321");

    let response = send(&app, "POST", "/users", Some(clash)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!(["Email is already in use"]));
}

#[tokio::test]
async fn test_create_duplicate_phone_is_rejected() {
    let app = create_router(test_state().await);
    send(&app, "POST", "/users", Some(ann())).await;

    let mut clash = ann();
    clash["email"] = json!("annie@x.com");

    let response = send(&app, "POST", "/users", Some(clash)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!(["Phone number is already in use"]));

    let users = json_body(send(&app, "GET", "/users", None).await).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = create_router(test_state().await);

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = create_router(test_state().await);

    let response = send(&app, "GET", &format!("/users/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_replaces_user() {
    let app = create_router(test_state().await);
    let created = json_body(send(&app, "POST", "/users", Some(ann())).await).await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    // Keeping its own email and phone is not a duplicate
    let mut replacement = ann();
    replacement["firstName"] = json!("Annie");

    let response = send(&app, "PUT", &uri, Some(replacement)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = json_body(send(&app, "GET", &uri, None).await).await;
    assert_eq!(fetched["firstName"], "Annie");
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn test_update_invalid_leaves_user_unchanged() {
    let app = create_router(test_state().await);
    let created = json_body(send(&app, "POST", "/users", Some(ann())).await).await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let mut replacement = ann();
    replacement["lastName"] = json!("");

    let response = send(&app, "PUT", &uri, Some(replacement)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!(["Last name is required"]));

    let fetched = json_body(send(&app, "GET", &uri, None).await).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = create_router(test_state().await);

    let uri = format!("/users/{}", uuid::Uuid::new_v4());
    let response = send(&app, "PUT", &uri, Some(ann())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = create_router(test_state().await);
    let created = json_body(send(&app, "POST", "/users", Some(ann())).await).await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_without_params_is_plain_array() {
    let app = create_router(test_state().await);
    for n in 1..=3 {
        send(&app, "POST", "/users", Some(numbered(n))).await;
    }

    let response = send(&app, "GET", "/users", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_with_params_returns_envelope() {
    let app = create_router(test_state().await);
    for n in 1..=25 {
        send(&app, "POST", "/users", Some(numbered(n))).await;
    }

    let response = send(&app, "GET", "/users?pageIndex=3&pageSize=10", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = json_body(response).await;
    assert_eq!(page["totalCount"], 25);
    assert_eq!(page["pageIndex"], 3);
    assert_eq!(page["pageSize"], 10);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["users"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_page_size_is_capped() {
    let app = create_router(test_state().await);

    let page = json_body(send(&app, "GET", "/users?pageSize=500", None).await).await;
    assert_eq!(page["pageIndex"], 1);
    assert_eq!(page["pageSize"], 100);
    assert_eq!(page["totalPages"], 0);
}

#[tokio::test]
async fn test_list_rejects_invalid_page_params() {
    let app = create_router(test_state().await);

    for uri in ["/users?pageIndex=0", "/users?pageSize=0", "/users?pageIndex=-1"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_rejects_page_beyond_store_range() {
    let app = create_router(test_state().await);

    let response = send(&app, "GET", "/users?pageIndex=18446744073709551615", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_id_uses_error_envelope() {
    let app = create_router(test_state().await);

    for method in ["GET", "DELETE"] {
        let response = send(&app, method, "/users/not-a-uuid", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }

    let response = send(&app, "PUT", "/users/not-a-uuid", Some(ann())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Ambient
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = create_router(test_state().await);

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = create_router(test_state().await);

    let request = Request::builder()
        .uri("/users")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "req-42"
    );
}
