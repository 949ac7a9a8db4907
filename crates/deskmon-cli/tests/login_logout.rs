//! Integration tests for login/logout/status commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Creates a temp DESKMON_HOME directory for test isolation.
fn temp_home() -> TempDir {
    tempdir().expect("create temp deskmon home")
}

#[tokio::test]
async fn test_login_saves_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "user@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-0123456789abcdef",
            "token_type": "bearer",
            "user_id": 42,
            "email": "user@example.com",
            "role": "user"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .env("DESKMON_API_URL", mock_server.uri())
        .args(["login", "--email", "user@example.com"])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as user@example.com"))
        .stdout(predicate::str::contains("session.json"));

    let session_path = home.path().join("session.json");
    assert!(session_path.exists(), "session.json should exist");

    let contents = fs::read_to_string(&session_path).unwrap();
    let session: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let object = session.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.values().all(serde_json::Value::is_string));
    assert_eq!(session["access_token"], "tok-0123456789abcdef");
    assert_eq!(session["user_id"], "42");
    assert_eq!(session["email"], "user@example.com");
    assert_eq!(session["role"], "user");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&session_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[tokio::test]
async fn test_login_rejected_shows_detail() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .env("DESKMON_API_URL", mock_server.uri())
        .args(["login", "--email", "user@example.com"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test]
async fn test_login_tokenless_200_is_rejected() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"detail": "Account disabled"})),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .env("DESKMON_API_URL", mock_server.uri())
        .args(["login", "--email", "user@example.com"])
        .write_stdin("hunter2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account disabled"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_login_unreachable_server() {
    let home = temp_home();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .env("DESKMON_API_URL", "http://127.0.0.1:1")
        .args(["login", "--email", "user@example.com"])
        .write_stdin("hunter2\n")
        .assert()
        .failure();
}

#[test]
fn test_logout_removes_session() {
    let home = temp_home();
    let session_path = home.path().join("session.json");

    fs::write(
        &session_path,
        r#"{"access_token":"tok","user_id":"1","email":"user@example.com","role":"user"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!session_path.exists());
}

#[test]
fn test_logout_when_not_logged_in() {
    let home = temp_home();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_status_masks_token() {
    let home = temp_home();

    fs::write(
        home.path().join("session.json"),
        r#"{"access_token":"tok-0123456789abcdef","user_id":"42","email":"user@example.com","role":"user"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("user@example.com"))
        .stdout(predicate::str::contains("tok-01234567..."))
        .stdout(predicate::str::contains("tok-0123456789abcdef").not());
}

#[test]
fn test_status_handles_multibyte_token() {
    let home = temp_home();

    // Server-issued tokens are arbitrary text; a hand-edited session must not
    // crash the display path.
    fs::write(
        home.path().join("session.json"),
        r#"{"access_token":"xабвгдежзи","user_id":"42","email":"user@example.com","role":"user"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("xабвгдежзи").not());
}

#[test]
fn test_status_when_not_logged_in() {
    let home = temp_home();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}
