//! HTTP client for the auth API.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind};
pub use types::{AuthResponse, HealthResponse, LoginRequest, RegisterRequest, UserResponse};
