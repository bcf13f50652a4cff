use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use box_transfer_client::handler::AppRouter;
use chrono::{FixedOffset, TimeZone};
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynClock, DynTransferRepository},
    config::FixedClock,
    repository::SheetTransferRepository,
    state::AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let now = FixedOffset::east_opt(19_800)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 14, 9, 5, 0)
        .unwrap();
    let state = AppState::with_parts(
        Arc::new(SheetTransferRepository::new()) as DynTransferRepository,
        Arc::new(FixedClock::new(now)) as DynClock,
    );
    AppRouter::build(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn send_form() -> Value {
    json!({
        "sku": "X1",
        "origin": "WH 3",
        "destination": "WH 1",
        "sender_name": "Alice",
        "box_count": 5
    })
}

#[tokio::test]
async fn send_and_receive_over_http() {
    let app = app();

    let (status, created) = send(&app, "POST", "/api/transfers", Some(send_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "Sent");
    assert_eq!(created["data"]["origin_warehouse"], "WH 3");
    let id = created["data"]["transfer_id"].as_str().unwrap().to_string();

    let (status, pending) = send(&app, "GET", "/api/transfers/pending", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["data"][0]["transfer_id"], id.as_str());

    let (status, received) = send(
        &app,
        "POST",
        &format!("/api/transfers/{id}/receive"),
        Some(json!({ "receiver_name": "Bob", "received_box_count": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(received["data"]["status"], "Received");
    assert_eq!(received["data"]["receiver_name"], "Bob");
    assert_eq!(received["data"]["received_box_count"], 5);

    let (_, pending) = send(&app, "GET", "/api/transfers/pending", None).await;
    assert_eq!(pending["data"], json!([]));
    assert_eq!(
        pending["message"],
        "There is currently no new stock to accept."
    );

    let (status, again) = send(
        &app,
        "POST",
        &format!("/api/transfers/{id}/receive"),
        Some(json!({ "receiver_name": "Carol", "received_box_count": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["status"], "error");
}

#[tokio::test]
async fn missing_sender_is_a_bad_request() {
    let app = app();
    let mut form = send_form();
    form["sender_name"] = json!("");

    let (status, body) = send(&app, "POST", "/api/transfers", Some(form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Sender name is required"));

    let (_, all) = send(&app, "GET", "/api/transfers", None).await;
    assert_eq!(all["data"], json!([]));
}

#[tokio::test]
async fn unknown_warehouse_is_rejected_by_the_extractor() {
    let app = app();
    let mut form = send_form();
    form["origin"] = json!("WH 9");

    let (status, body) = send(&app, "POST", "/api/transfers", Some(form)).await;

    assert!(status.is_client_error());
    assert_eq!(body["status"], "error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_uses_the_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/transfers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"sku\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn receiving_unknown_transfer_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/transfers/9b2f6c1e-4a7d-4c47-9a51-2f1c3e0d8b11/receive",
        Some(json!({ "receiver_name": "Bob", "received_box_count": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn warehouses_and_metrics_are_served() {
    let app = app();

    let (status, options) = send(&app, "GET", "/api/warehouses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(options["data"]["origins"], json!(["WH 3"]));
    assert_eq!(
        options["data"]["destinations"],
        json!(["WH 1", "WH 2", "WH 5", "WH VENUS"])
    );

    send(&app, "POST", "/api/transfers", Some(send_form())).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(text.contains("transfer_service_request_counter"));
}
