//! Request and response types for the auth API.

use serde::{Deserialize, Serialize};

/// Role assigned to every account created through this client.
pub const DEFAULT_ROLE: &str = "user";

/// Body for POST auth/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Builds a login request, trimming surrounding whitespace from both fields.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.trim().to_string(),
        }
    }
}

/// Body for POST auth/register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

impl RegisterRequest {
    /// Builds a registration request, trimming whitespace from every field.
    ///
    /// The password is trimmed so the stored credential matches what a later
    /// login sends. The role is always "user", there is no way to request
    /// another one.
    pub fn new(email: &str, password: &str, full_name: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.trim().to_string(),
            full_name: full_name.trim().to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Response body of POST auth/login.
///
/// Every field is optional; backends differ in what they include and
/// some answer 200 with only a detail message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub detail: Option<String>,
}

/// Response body of POST auth/register and GET auth/me.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResponse {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub detail: Option<String>,
}

/// Response body of GET health.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: Option<String>,
}
