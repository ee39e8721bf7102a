//! Health check and monitoring endpoints
//!
//! Provides health and readiness endpoints for load balancer integration
//! and service availability monitoring.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Shared provider deadline in seconds
    pub shared_deadline_secs: u64,
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    /// Ready status
    pub ready: bool,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

/// GET /health - Health check endpoint
///
/// Returns the server health status, version, and uptime.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs: uptime,
        shared_deadline_secs: state.orchestrator.options().shared_deadline.as_secs(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready - Readiness probe endpoint
///
/// Returns 200 OK when the server is ready to accept requests.
async fn ready_handler() -> impl IntoResponse {
    let response = ReadyResponse { ready: true };
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::state_with;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint_returns_200() {
        let router = routes().with_state(state_with(Vec::new(), Vec::new()));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint_returns_json() {
        let router = routes().with_state(state_with(Vec::new(), Vec::new()));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, crate::VERSION);
        assert_eq!(health.shared_deadline_secs, 90);
    }

    #[tokio::test]
    async fn test_ready_endpoint_returns_json() {
        let router = routes().with_state(state_with(Vec::new(), Vec::new()));

        let response = router
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let ready: ReadyResponse = serde_json::from_slice(&body).unwrap();

        assert!(ready.ready);
    }

    #[tokio::test]
    async fn test_health_response_camel_case() {
        let router = routes().with_state(state_with(Vec::new(), Vec::new()));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json_str = std::str::from_utf8(&body).unwrap();

        assert!(json_str.contains("uptimeSecs"));
        assert!(json_str.contains("sharedDeadlineSecs"));
    }
}
