//! HTTP access to the authentication endpoint
//!
//! [`AuthClient`] is the seam between the login form and the network. A
//! failed call always surfaces as a [`ClientError`], and
//! [`ClientError::server_message`] is the one place that knows where a
//! server-provided explanation lives.

use gloo_net::http::Request;

use crate::core::{Credentials, ErrorBody, LOGIN_ENDPOINT, SessionArtifact};

/// Failure of an authentication call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Request failed with status {status}")]
    Status { status: u16, body: Option<ErrorBody> },

    /// A success response whose body is not a session artifact
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message supplied by the server in the error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                body: Some(ErrorBody {
                    message: Some(message),
                }),
                ..
            } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Something that can exchange credentials for a session
#[allow(async_fn_in_trait)]
pub trait AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionArtifact, ClientError>;
}

/// Fetch-based client used in the browser
#[derive(Debug, Clone, Default)]
pub struct FetchAuthClient {
    /// Prefix for the endpoint path; empty means same origin
    base_url: String,
}

impl FetchAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, LOGIN_ENDPOINT)
    }
}

impl AuthClient for FetchAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionArtifact, ClientError> {
        let response = Request::post(&self.login_url())
            .json(credentials)
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.json::<ErrorBody>().await.ok();
            return Err(ClientError::Status { status, body });
        }

        response
            .json::<SessionArtifact>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_from_error_body() {
        let err = ClientError::Status {
            status: 401,
            body: Some(ErrorBody::new("Invalid credentials")),
        };
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_server_message_absent() {
        let cases = [
            ClientError::Network("offline".into()),
            ClientError::Decode("missing field `token`".into()),
            ClientError::Status {
                status: 500,
                body: None,
            },
            ClientError::Status {
                status: 500,
                body: Some(ErrorBody::default()),
            },
            ClientError::Status {
                status: 400,
                body: Some(ErrorBody::new("")),
            },
        ];

        for err in cases {
            assert_eq!(err.server_message(), None, "{err:?}");
        }
    }

    #[test]
    fn test_login_url() {
        assert_eq!(FetchAuthClient::default().login_url(), "/api/auth/login");
        assert_eq!(
            FetchAuthClient::new("https://api.carelink.example/").login_url(),
            "https://api.carelink.example/api/auth/login"
        );
    }
}
