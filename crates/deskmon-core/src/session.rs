//! Session storage for deskmon.
//!
//! A successful login is persisted as ${DESKMON_HOME}/session.json so that
//! later invocations stay authenticated. The file holds exactly four string
//! fields mirroring what the auth API returns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::AuthResponse;
use crate::config::paths;

/// Persisted authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl Session {
    /// Builds a session from a login response.
    ///
    /// Returns None unless the response carries a non-empty access token.
    /// Absent optional fields are stored as empty strings.
    pub fn from_login(response: &AuthResponse) -> Option<Self> {
        let access_token = response
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())?
            .to_string();

        Some(Self {
            access_token,
            user_id: response.user_id.map(|id| id.to_string()).unwrap_or_default(),
            email: response.email.clone().unwrap_or_default(),
            role: response.role.clone().unwrap_or_default(),
        })
    }

    /// Returns a masked form of the access token safe for display.
    pub fn masked_token(&self) -> String {
        mask_token(&self.access_token)
    }
}

/// Returns the path to the session file.
pub fn session_path() -> PathBuf {
    paths::deskmon_home().join("session.json")
}

/// Loads the saved session, if any.
///
/// A missing or unreadable file reads as "not logged in".
pub fn load() -> Option<Session> {
    load_from(&session_path())
}

/// Loads a session from a specific path.
pub fn load_from(path: &Path) -> Option<Session> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Saves the session to the default session path.
pub fn save(session: &Session) -> Result<()> {
    save_to(&session_path(), session)
}

/// Saves a session to a specific path with restrictive permissions.
pub fn save_to(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write session to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, json)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;
    }

    Ok(())
}

/// Removes the saved session.
///
/// Returns true if a session file was removed, false if none existed.
pub fn clear() -> Result<bool> {
    clear_from(&session_path())
}

/// Removes a session file at a specific path.
pub fn clear_from(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session at {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Masks a token for display, keeping a short recognizable prefix.
///
/// Counts characters, not bytes; the token is arbitrary server-issued text.
fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        "***".to_string()
    } else {
        let prefix: String = token.chars().take(12).collect();
        format!("{prefix}...")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn auth_response(token: Option<&str>) -> AuthResponse {
        AuthResponse {
            access_token: token.map(String::from),
            token_type: Some("bearer".to_string()),
            user_id: Some(42),
            email: Some("user@example.com".to_string()),
            role: Some("user".to_string()),
            detail: None,
        }
    }

    /// Test: `from_login` fills all four fields from the response.
    #[test]
    fn test_from_login_builds_session() {
        let session = Session::from_login(&auth_response(Some("tok-abcdef"))).unwrap();
        assert_eq!(session.access_token, "tok-abcdef");
        assert_eq!(session.user_id, "42");
        assert_eq!(session.email, "user@example.com");
        assert_eq!(session.role, "user");
    }

    /// Test: `from_login` requires a non-blank access token.
    #[test]
    fn test_from_login_requires_token() {
        assert!(Session::from_login(&auth_response(None)).is_none());
        assert!(Session::from_login(&auth_response(Some(""))).is_none());
        assert!(Session::from_login(&auth_response(Some("   "))).is_none());
    }

    /// Test: absent optional fields become empty strings.
    #[test]
    fn test_from_login_defaults_missing_fields() {
        let response = AuthResponse {
            access_token: Some("tok-abcdef".to_string()),
            token_type: None,
            user_id: None,
            email: None,
            role: None,
            detail: None,
        };
        let session = Session::from_login(&response).unwrap();
        assert_eq!(session.user_id, "");
        assert_eq!(session.email, "");
        assert_eq!(session.role, "");
    }

    /// Test: serialized session holds exactly four string entries.
    #[test]
    fn test_session_serializes_four_string_fields() {
        let session = Session {
            access_token: "tok".to_string(),
            user_id: "1".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        };

        let value = serde_json::to_value(&session).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(object.values().all(serde_json::Value::is_string));
    }

    /// Test: save then load round-trips through disk.
    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session {
            access_token: "tok-abcdef".to_string(),
            user_id: "42".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        };

        save_to(&path, &session).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, session);
    }

    /// Test: session file is written with owner-only permissions.
    #[cfg(unix)]
    #[test]
    fn test_save_sets_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session {
            access_token: "tok".to_string(),
            user_id: String::new(),
            email: String::new(),
            role: String::new(),
        };
        save_to(&path, &session).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    /// Test: a missing or corrupt file reads as not logged in.
    #[test]
    fn test_load_missing_or_corrupt_returns_none() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(load_from(&missing).is_none());

        let corrupt = dir.path().join("session.json");
        fs::write(&corrupt, "not json").unwrap();
        assert!(load_from(&corrupt).is_none());
    }

    /// Test: clear reports whether a file was removed.
    #[test]
    fn test_clear_reports_removal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert!(!clear_from(&path).unwrap());

        fs::write(&path, "{}").unwrap();
        assert!(clear_from(&path).unwrap());
        assert!(!path.exists());
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("1234567890123456"), "***");
        assert_eq!(
            mask_token("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijkl..."
        );
    }

    /// Test: masking counts characters, so multi-byte tokens never split.
    #[test]
    fn test_mask_token_multibyte() {
        // 10 chars but 19 bytes; short enough to hide entirely.
        assert_eq!(mask_token("xабвгдежзи"), "***");
        // 18 chars; the prefix is the first 12 characters, not bytes.
        assert_eq!(mask_token("абвгдежзиклмнопрст"), "абвгдежзиклм...");
    }
}
