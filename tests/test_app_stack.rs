use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    routing::get,
};
use clinic_orchard::{
    build_app, config::Config, create_clinic_routes, db::MemoryStore, state::ClinicState,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::from_lookup(3001, |key| match key {
        "IN_MEMORY" => Some("true".into()),
        _ => None,
    })
    .unwrap();
    config.request_timeout = Duration::from_millis(50);
    config
}

fn clinic_app() -> Router {
    let routes = create_clinic_routes(ClinicState {
        store: Arc::new(MemoryStore::seeded()),
    });

    build_app(routes, &test_config()).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_404() {
    let response = clinic_app()
        .oneshot(get_request("/nowhere"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"404 Not Found");
}

#[tokio::test]
async fn test_known_route_passes_through_layers() {
    let response = clinic_app()
        .oneshot(get_request("/patients"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let routes = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            "late"
        }),
    );
    let app = build_app(routes, &test_config()).unwrap();

    let response = app.oneshot(get_request("/slow")).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_allowed_origin_gets_cors_header() {
    let request = Request::builder()
        .uri("/doctors")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = clinic_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn test_other_origin_gets_no_cors_header() {
    let request = Request::builder()
        .uri("/doctors")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();

    let response = clinic_app().oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[test]
fn test_wildcard_mixed_with_origins_fails_to_build() {
    let mut config = test_config();
    config.allowed_origins = vec!["*".into(), "http://a.test".into()];

    assert!(build_app(Router::new(), &config).is_err());
}
