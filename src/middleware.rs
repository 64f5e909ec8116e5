use axum::{
    BoxError,
    extract::{ConnectInfo, Request},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::keyed::DefaultKeyedStateStore};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::errors::AppError;

pub type IpRateLimiter = Arc<RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>>;

pub fn create_rate_limiter(requests_per_minute: u32) -> Result<IpRateLimiter, AppError> {
    let per_minute = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
        AppError::EnvError("Rate limit must allow at least one request per minute".into())
    })?;

    Ok(Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))))
}

// Requests without connection info (e.g. in-process tests) share one bucket
pub async fn rate_limit_middleware(
    rate_limiter: IpRateLimiter,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let client_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match rate_limiter.check_key(&client_ip) {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded for IP: {}", client_ip);
            Err(StatusCode::TOO_MANY_REQUESTS)
        }
    }
}

pub async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".into())
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        AppError::InternalError.to_response()
    }
}

pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let allow_origin = match allowed_origins {
        [only] if only == "*" => {
            tracing::info!("CORS allows any origin");
            AllowOrigin::any()
        }
        _ => {
            if allowed_origins.iter().any(|origin| origin == "*") {
                return Err(AppError::EnvError(
                    "ALLOWED_ORIGINS cannot mix '*' with explicit origins".into(),
                ));
            }

            let origins = allowed_origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .map_err(|_| AppError::EnvError(format!("Invalid CORS origin: {}", origin)))
                })
                .collect::<Result<Vec<_>, _>>()?;

            tracing::info!("CORS allowed origins: {:?}", origins);
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware as axum_middleware, routing::get};
    use tower::ServiceExt;

    fn limited_app(requests_per_minute: u32) -> Router {
        let limiter = create_rate_limiter(requests_per_minute).unwrap();

        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum_middleware::from_fn(move |req, next| {
                rate_limit_middleware(limiter.clone(), req, next)
            }))
    }

    fn get_root() -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_after_quota() {
        let app = limited_app(1);

        let first = app.clone().oneshot(get_root()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(get_root()).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_zero_quota_rejected() {
        assert!(matches!(create_rate_limiter(0), Err(AppError::EnvError(_))));
    }

    #[test]
    fn test_cors_rejects_bad_origin() {
        assert!(cors_layer(&["http://localhost:3000".into()]).is_ok());
        assert!(cors_layer(&["bad\norigin".into()]).is_err());
    }

    #[test]
    fn test_cors_wildcard_alone_or_not_at_all() {
        assert!(cors_layer(&["*".into()]).is_ok());
        assert!(matches!(
            cors_layer(&["*".into(), "http://a.test".into()]),
            Err(AppError::EnvError(_))
        ));
    }

    #[tokio::test]
    async fn test_wildcard_cors_answers_any_origin() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&["*".into()]).unwrap());

        let request = axum::http::Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://anywhere.test")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn test_timeout_error_mapping() {
        let (status, _) = handle_timeout_error(tower::timeout::error::Elapsed::new().into()).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

        let (status, _) = handle_timeout_error(BoxError::from("boom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
