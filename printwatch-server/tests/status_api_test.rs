use axum::body::{Body, to_bytes};
use axum::http;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use printwatch_server::app::create_app;
use printwatch_server::models::PrinterStatus;
use printwatch_server::services::SharedStatus;

#[tokio::test]
async fn status_is_all_null_before_any_frame() {
    let app = create_app(SharedStatus::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&res_body).unwrap();

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 11);
    assert!(object.values().all(|value| value.is_null()));
}

#[tokio::test]
async fn status_reflects_the_current_snapshot() {
    let status = SharedStatus::default();
    *status.write().await = PrinterStatus {
        nozzle_temp: Some(195),
        nozzle_target_temp: Some(200),
        sd_bytes_printed: Some(1024),
        sd_bytes_total: Some(204800),
        status: Some("BUILDING_FROM_SD".into()),
        ..Default::default()
    };

    let app = create_app(status);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&res_body).unwrap();

    assert_eq!(json["nozzleTemp"], 195);
    assert_eq!(json["nozzleTargetTemp"], 200);
    assert_eq!(json["sdBytesPrinted"], 1024);
    assert_eq!(json["sdBytesTotal"], 204800);
    assert_eq!(json["status"], "BUILDING_FROM_SD");
    assert!(json["bedTemp"].is_null());
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let app = create_app(SharedStatus::default());

    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let app = create_app(SharedStatus::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&res_body[..], b"Not Found");
}

#[tokio::test]
async fn home_page_serves_the_dashboard() {
    let app = create_app(SharedStatus::default());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let res_body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(res_body.to_vec()).unwrap();

    assert!(page.contains("/status"));
}
