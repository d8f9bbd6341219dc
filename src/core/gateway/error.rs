//! Terminal error handling for the gateway
//!
//! Every failure a request can run into ends up here and leaves as a JSON
//! body of the form `{"message": "..."}`, which is what the login view reads.

use std::any::Any;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::core::session::ErrorBody;

/// Message sent with rate-limit rejections
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Gateway error types
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// A request extractor refused the input (bad JSON, wrong content type, body too large)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited { retry_after_secs: u64 },

    #[error("{0}")]
    NotImplemented(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Rejected { status, .. } => *status,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Convert GatewayError to API response
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            GatewayError::Internal(detail) => {
                tracing::error!(error = %detail, "Unhandled gateway error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut response = (status, Json(ErrorBody::new(message))).into_response();

        if let GatewayError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

/// JSON body extractor whose rejections go through [`GatewayError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Fallback for paths below the API prefix that no route matches
pub async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

/// Turn a handler panic into a 500 response instead of dropping the connection
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    GatewayError::Internal(detail).into_response()
}
