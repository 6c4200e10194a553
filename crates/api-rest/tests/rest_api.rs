//! In-process REST API tests over the in-memory store.

use api_rest::{router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docsys_core::{MemoryStore, PrescriptionService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router {
    let service = PrescriptionService::new(Arc::new(MemoryStore::new()), Duration::from_secs(2));
    router(AppState {
        service: Arc::new(service),
    })
}

fn valid_payload() -> Value {
    json!({
        "name": "Jane Doe",
        "age": 30,
        "gender": "Female",
        "dateOfPrescription": "2025-01-01",
        "inscription": [
            {"name": "Paracetamol", "dosage": "500mg", "frequency": 2, "quantity": 10}
        ],
        "instructions": "Take after meals",
        "doctorInformation": "Dr. Mark Doe, MD"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_alive() {
    let response = app().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let response = app()
        .oneshot(json_request("POST", "/prescriptions", &valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let id = body["data"]["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(body["data"]["name"], "Jane Doe");
    assert_eq!(body["data"]["inscription"][0]["dosage"], "500mg");
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn create_names_the_missing_field() {
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("instructions");

    let response = app()
        .oneshot(json_request("POST", "/prescriptions", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing field: instructions");
}

#[tokio::test]
async fn create_rejects_bad_inscription_shape() {
    let mut payload = valid_payload();
    payload["inscription"][0]["frequency"] = json!("twice daily");

    let response = app()
        .oneshot(json_request("POST", "/prescriptions", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Invalid inscription format. Must be an array of medicine objects."
    );
}

#[tokio::test]
async fn undecodable_body_is_a_400_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/prescriptions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Malformed payload");
}

#[tokio::test]
async fn created_record_shows_up_in_list() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/prescriptions", &valid_payload()))
        .await
        .unwrap();
    let created = body_json(created).await;
    let id = created["data"]["_id"].as_str().unwrap().to_owned();

    let response = app.oneshot(get_request("/prescriptions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listed: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["_id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![id.as_str()]);
}

#[tokio::test]
async fn update_and_delete_reject_malformed_ids() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/prescriptions/not-an-id",
            &valid_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Prescription not found");

    let request = Request::builder()
        .method("DELETE")
        .uri("/prescriptions/not-an-id")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_returns_the_persisted_record() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/prescriptions", &valid_payload()))
        .await
        .unwrap();
    let created = body_json(created).await;
    let id = created["data"]["_id"].as_str().unwrap().to_owned();

    let mut replacement = valid_payload();
    replacement["instructions"] = json!("Take before meals");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/prescriptions/{id}"),
            &replacement,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["_id"], id.as_str());
    assert_eq!(body["data"]["instructions"], "Take before meals");
    assert_eq!(body["data"]["createdAt"], created["data"]["createdAt"]);

    // The list reflects the replacement.
    let listed = body_json(app.oneshot(get_request("/prescriptions")).await.unwrap()).await;
    assert_eq!(listed["data"][0]["instructions"], "Take before meals");
}

#[tokio::test]
async fn delete_confirms_then_404s_on_repeat() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_request("POST", "/prescriptions", &valid_payload()))
        .await
        .unwrap();
    let created = body_json(created).await;
    let id = created["data"]["_id"].as_str().unwrap().to_owned();

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/prescriptions/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Prescription deleted");

    let listed = body_json(
        app.clone()
            .oneshot(get_request("/prescriptions"))
            .await
            .unwrap(),
    )
    .await;
    assert!(listed["data"].as_array().unwrap().is_empty());

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/prescriptions/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(delete_again).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn age_zero_is_accepted() {
    let mut payload = valid_payload();
    payload["age"] = json!(0);

    let response = app()
        .oneshot(json_request("POST", "/prescriptions", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["age"], 0);
}
