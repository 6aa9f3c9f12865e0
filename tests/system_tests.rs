mod common;

use axum::http::StatusCode;
use shiftdesk::api::REQUEST_ID_HEADER;

use common::spawn_app;

#[tokio::test]
async fn test_health_probes_need_no_session() {
    let test = spawn_app("health").await;

    let (status, body) = test
        .send("GET", "/api/system/health/live", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");

    let (status, body) = test
        .send("GET", "/api/system/health/ready", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["database"], true);
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_metrics_require_admin() {
    let test = spawn_app("metrics").await;

    let (status, _) = test.send("GET", "/api/metrics", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = test.login_admin().await;
    let (_, operator) = test.operator(&admin, "watcher").await;

    let (status, _) = test
        .send("GET", "/api/metrics", Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The harness installs no recorder.
    let (status, _) = test.send("GET", "/api/metrics", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let test = spawn_app("request-id").await;

    let (_, first, _) = test
        .send_raw("GET", "/api/system/health/live", None, None)
        .await;
    let (status, second, _) = test.send_raw("GET", "/api/reports", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let first = first.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    let second = second.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(first).is_ok());
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let test = spawn_app("unknown-route").await;
    let (status, _) = test.send("GET", "/api/anything-else", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
