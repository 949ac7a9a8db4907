//! Shared login and registration flow logic.
//!
//! The TUI screens and the headless CLI commands both go through these
//! helpers so that validation order and user-facing messages stay identical.

use crate::api::{ApiError, ApiErrorKind, AuthResponse, UserResponse};
use crate::session::Session;

pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_CONNECTION_FAILED: &str = "Failed to connect to the server";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const MSG_EMAIL_TAKEN: &str = "A user with this email already exists";
pub const MSG_INVALID_REGISTRATION: &str = "Invalid registration data";
pub const MSG_SERVER_ERROR: &str = "Server error, try again later";
pub const MSG_UNRECOGNIZED_RESPONSE: &str = "Unrecognized server response";
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";
pub const MSG_REGISTER_SUCCESS: &str = "Registration successful";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Checks a registration password pair before any network call.
///
/// The mismatch check runs first, then the length check.
pub fn validate_registration(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password != confirm {
        return Err(MSG_PASSWORD_MISMATCH);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(MSG_PASSWORD_TOO_SHORT);
    }
    Ok(())
}

/// What a 2xx login response amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The response carried a usable access token.
    Success(Session),
    /// The server answered 2xx but withheld a token.
    Rejected(String),
}

/// Interprets a successful login response body.
///
/// Some backends answer 200 with a detail message instead of a token;
/// that counts as a rejection, not a session.
pub fn login_outcome(response: &AuthResponse) -> LoginOutcome {
    if let Some(session) = Session::from_login(response) {
        return LoginOutcome::Success(session);
    }

    let detail = response
        .detail
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(MSG_LOGIN_FAILED);
    LoginOutcome::Rejected(detail.to_string())
}

/// Maps a failed login call to the message shown to the user.
pub fn login_error_message(err: &ApiError) -> String {
    if err.message.trim().is_empty() {
        MSG_CONNECTION_FAILED.to_string()
    } else {
        err.message.clone()
    }
}

/// Whether a 2xx registration response actually created an account.
pub fn register_accepted(response: &UserResponse) -> bool {
    response.id.is_some()
        || response
            .email
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty())
}

/// Maps a failed registration call to the message shown to the user.
pub fn register_error_message(err: &ApiError) -> String {
    match err.kind {
        ApiErrorKind::Conflict => MSG_EMAIL_TAKEN.to_string(),
        ApiErrorKind::Validation => MSG_INVALID_REGISTRATION.to_string(),
        ApiErrorKind::ServerFault => MSG_SERVER_ERROR.to_string(),
        ApiErrorKind::Network | ApiErrorKind::Unknown => {
            if err.message.trim().is_empty() {
                MSG_CONNECTION_FAILED.to_string()
            } else {
                err.message.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mismatched passwords are rejected before the length check.
    #[test]
    fn test_validate_registration_mismatch_first() {
        assert_eq!(
            validate_registration("abc", "abd"),
            Err(MSG_PASSWORD_MISMATCH)
        );
        // Both too short AND mismatched: mismatch wins.
        assert_eq!(validate_registration("a", "b"), Err(MSG_PASSWORD_MISMATCH));
    }

    /// Matching but short passwords fail the length check.
    #[test]
    fn test_validate_registration_length() {
        assert_eq!(
            validate_registration("abc12", "abc12"),
            Err(MSG_PASSWORD_TOO_SHORT)
        );
        assert_eq!(validate_registration("abc123", "abc123"), Ok(()));
    }

    /// Length is counted in characters, not bytes.
    #[test]
    fn test_validate_registration_counts_chars() {
        assert_eq!(validate_registration("пароль", "пароль"), Ok(()));
    }

    /// A token-bearing response becomes a session.
    #[test]
    fn test_login_outcome_success() {
        let response = AuthResponse {
            access_token: Some("tok-abcdef".to_string()),
            token_type: Some("bearer".to_string()),
            user_id: Some(7),
            email: Some("user@example.com".to_string()),
            role: Some("user".to_string()),
            detail: None,
        };

        match login_outcome(&response) {
            LoginOutcome::Success(session) => {
                assert_eq!(session.access_token, "tok-abcdef");
                assert_eq!(session.user_id, "7");
            }
            LoginOutcome::Rejected(msg) => panic!("unexpected rejection: {msg}"),
        }
    }

    /// A tokenless 2xx response is rejected with its detail message.
    #[test]
    fn test_login_outcome_rejected_with_detail() {
        let response = AuthResponse {
            access_token: None,
            token_type: None,
            user_id: None,
            email: None,
            role: None,
            detail: Some("Account disabled".to_string()),
        };

        assert_eq!(
            login_outcome(&response),
            LoginOutcome::Rejected("Account disabled".to_string())
        );
    }

    /// A tokenless response without detail falls back to the generic message.
    #[test]
    fn test_login_outcome_rejected_generic() {
        let response = AuthResponse {
            access_token: None,
            token_type: None,
            user_id: None,
            email: None,
            role: None,
            detail: Some("  ".to_string()),
        };

        assert_eq!(
            login_outcome(&response),
            LoginOutcome::Rejected(MSG_LOGIN_FAILED.to_string())
        );
    }

    /// Login errors surface the mapped message, with a connection fallback.
    #[test]
    fn test_login_error_message() {
        let err = ApiError::from_status(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(login_error_message(&err), "Invalid credentials");

        let blank = ApiError::network("");
        assert_eq!(login_error_message(&blank), MSG_CONNECTION_FAILED);
    }

    /// Registration acceptance needs an id or a non-empty email.
    #[test]
    fn test_register_accepted() {
        let with_id = UserResponse {
            id: Some(1),
            user_id: None,
            email: None,
            full_name: None,
            role: None,
            detail: None,
        };
        assert!(register_accepted(&with_id));

        let with_email = UserResponse {
            id: None,
            user_id: None,
            email: Some("user@example.com".to_string()),
            full_name: None,
            role: None,
            detail: None,
        };
        assert!(register_accepted(&with_email));

        let empty = UserResponse {
            id: None,
            user_id: None,
            email: Some("  ".to_string()),
            full_name: None,
            role: None,
            detail: None,
        };
        assert!(!register_accepted(&empty));
    }

    /// Registration errors map per kind, not per message text.
    #[test]
    fn test_register_error_message_by_kind() {
        let conflict = ApiError::from_status(409, r#"{"detail":"exists"}"#);
        assert_eq!(register_error_message(&conflict), MSG_EMAIL_TAKEN);

        let invalid = ApiError::from_status(422, "");
        assert_eq!(register_error_message(&invalid), MSG_INVALID_REGISTRATION);

        let bad_request = ApiError::from_status(400, "");
        assert_eq!(register_error_message(&bad_request), MSG_INVALID_REGISTRATION);

        let server = ApiError::from_status(503, "");
        assert_eq!(register_error_message(&server), MSG_SERVER_ERROR);

        let network = ApiError::network("connection refused");
        assert_eq!(register_error_message(&network), "connection refused");

        let odd = ApiError::from_status(418, "");
        assert_eq!(register_error_message(&odd), "HTTP error! status: 418");
    }
}
