//! Application routes mounted below `/api`
//!
//! Token issuance is not part of this service; the login route validates its
//! input and reports that no authentication backend is attached.
//!
//! - GET  /api/health     - Liveness probe
//! - POST /api/auth/login - Credential check stand-in

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::core::gateway::{ApiJson, GatewayError};
use crate::core::session::{Credentials, MIN_PASSWORD_LEN};

/// Create the API router (paths relative to the API prefix)
pub fn api_routes() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(login_handler))
}

/// GET /api/health
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/auth/login
async fn login_handler(
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<Value>, GatewayError> {
    if !credentials.is_plausible() {
        return Err(GatewayError::BadRequest(format!(
            "Email and a password of at least {MIN_PASSWORD_LEN} characters are required"
        )));
    }

    tracing::info!(role = %credentials.role, "Login attempt with no authentication backend");

    Err(GatewayError::NotImplemented(
        "Authentication backend is not configured".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn post_login(body: &str) -> (StatusCode, Value) {
        let response = api_routes()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = api_routes()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_revalidates_credentials() {
        let (status, body) =
            post_login(r#"{"role":"ADMIN","email":"a@b.com","password":"abc"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("at least 6"));
    }

    #[tokio::test]
    async fn test_login_without_backend() {
        let (status, body) =
            post_login(r#"{"role":"ADMIN","email":"a@b.com","password":"abcdef"}"#).await;

        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["message"], "Authentication backend is not configured");
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_role() {
        let (status, body) =
            post_login(r#"{"role":"NURSE","email":"a@b.com","password":"abcdef"}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_json() {
        let (status, body) = post_login("{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
