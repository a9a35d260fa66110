//! Helper utilities to launch the relayscope API server.
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cognitive_complexity)]

use std::{net::SocketAddr, sync::Arc};

use api::{self, ApiState};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use eyre::Result;
use storage::StorageReader;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

async fn healthz() -> &'static str {
    "OK"
}

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = Arc::clone(&allowed);
            move |origin: &HeaderValue, _| match origin.to_str() {
                Ok(origin) => {
                    allowed.iter().any(|o| o == origin)
                        || origin.starts_with("http://localhost:")
                        || origin.starts_with("http://127.0.0.1:")
                }
                Err(_) => false,
            }
        }))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/healthz", get(healthz))
        .nest_service(&format!("/{API_VERSION}"), api::router(state))
        .layer(cors)
        .layer(trace)
}

/// Run the API server on the given address.
pub async fn run(
    addr: SocketAddr,
    client: StorageReader,
    allowed_origins: Vec<String>,
    default_limit: u64,
    transition_block: u64,
) -> Result<()> {
    let state = ApiState::new(client, default_limit, transition_block);
    let app = router(state, allowed_origins);

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;
    use url::Url;

    fn build_app(mock_url: &str, allowed: Vec<String>) -> Router {
        let url = Url::parse(mock_url).unwrap();
        let client =
            StorageReader::new(url, "db".to_owned(), "user".into(), "pass".into()).unwrap();
        let state = ApiState::new(client, 10, 15_537_394);
        router(state, allowed)
    }

    fn default_origins() -> Vec<String> {
        config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect()
    }

    async fn send_health(app: Router, origin: &str) -> (StatusCode, Option<String>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header("Origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        (status, cors)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let mock = clickhouse::test::Mock::new();
        let app = build_app(mock.url(), default_origins());
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn allows_default_origin() {
        let mock = clickhouse::test::Mock::new();
        let app = build_app(mock.url(), default_origins());
        let (status, cors) = send_health(app, "https://relayscope.xyz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("https://relayscope.xyz"));
    }

    #[tokio::test]
    async fn allows_extra_origin() {
        let mock = clickhouse::test::Mock::new();
        let mut origins = default_origins();
        origins.push("https://example.com".to_owned());
        let app = build_app(mock.url(), origins);
        let (status, cors) = send_health(app, "https://example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn allows_localhost_origin() {
        let mock = clickhouse::test::Mock::new();
        let app = build_app(mock.url(), default_origins());
        let (status, cors) = send_health(app, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn denies_other_origin() {
        let mock = clickhouse::test::Mock::new();
        let app = build_app(mock.url(), default_origins());
        let (status, cors) = send_health(app, "https://notallowed.com").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cors.is_none());
    }
}
