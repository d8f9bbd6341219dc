//! Session data shared by the login view and the gateway
//!
//! These types describe what travels over `POST /api/auth/login`: the
//! credentials the client sends and the session artifact it receives back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path of the authentication endpoint, relative to the site root
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

/// Minimum password length accepted by the login gate (after trimming)
pub const MIN_PASSWORD_LEN: usize = 6;

/// User category chosen on the login screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Clinician,
    Specialist,
    Admin,
}

impl Role {
    /// All roles in display order
    pub const ALL: [Role; 3] = [Role::Clinician, Role::Specialist, Role::Admin];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Clinician => "CLINICIAN",
            Role::Specialist => "SPECIALIST",
            Role::Admin => "ADMIN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Clinician => "Clinician",
            Role::Specialist => "Specialist",
            Role::Admin => "Administrator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login request body
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Whether the credentials pass the advisory submission gate.
    ///
    /// Email must be non-blank and the trimmed password at least
    /// [`MIN_PASSWORD_LEN`] UTF-16 code units long, the way the browser
    /// measures string length.
    pub fn is_plausible(&self) -> bool {
        !self.email.trim().is_empty()
            && self.password.trim().encode_utf16().count() >= MIN_PASSWORD_LEN
    }
}

/// User record returned with a session.
///
/// Only `role` is interpreted; every other field is kept as-is so the stored
/// copy matches what the server sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            extra: Map::new(),
        }
    }
}

/// Token and user pair returned after successful authentication
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionArtifact {
    pub token: String,
    pub user: SessionUser,
}

/// Error body returned by the gateway for any failed request
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}
