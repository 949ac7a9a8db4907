//! Auth command handlers.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use deskmon_core::api::{ApiClient, LoginRequest, RegisterRequest};
use deskmon_core::auth::{self, LoginOutcome};
use deskmon_core::config::Config;
use deskmon_core::session;

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(config: &Config, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(email) => email.to_string(),
        None => prompt_line("Email: ")?,
    };
    let password = prompt_line("Password: ")?;

    let client = ApiClient::from_config(config)?;
    let response = match client.login(&LoginRequest::new(&email, &password)).await {
        Ok(response) => response,
        Err(err) => anyhow::bail!(auth::login_error_message(&err)),
    };

    match auth::login_outcome(&response) {
        LoginOutcome::Rejected(message) => anyhow::bail!(message),
        LoginOutcome::Success(session) => {
            session::save(&session)?;

            let shown = if session.email.is_empty() {
                email.trim().to_string()
            } else {
                session.email.clone()
            };
            println!("✓ Logged in as {shown}");
            println!("  Session saved to: {}", session::session_path().display());
            Ok(())
        }
    }
}

pub async fn register(config: &Config) -> Result<()> {
    let email = prompt_line("Email: ")?;
    let full_name = prompt_line("Full name: ")?;
    let password = prompt_line("Password: ")?;
    let confirm = prompt_line("Confirm password: ")?;

    if let Err(message) = auth::validate_registration(&password, &confirm) {
        anyhow::bail!(message);
    }

    let client = ApiClient::from_config(config)?;
    let request = RegisterRequest::new(&email, &password, &full_name);
    let response = match client.register(&request).await {
        Ok(response) => response,
        Err(err) => anyhow::bail!(auth::register_error_message(&err)),
    };

    if !auth::register_accepted(&response) {
        anyhow::bail!(auth::MSG_UNRECOGNIZED_RESPONSE);
    }

    let shown = response
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| email.trim());
    println!("✓ Registered {shown}");
    println!("  Run `deskmon login` to sign in.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let removed = session::clear()?;

    if removed {
        println!("✓ Logged out");
        println!(
            "  Session removed from: {}",
            session::session_path().display()
        );
    } else {
        println!("Not logged in (no session found).");
    }
    Ok(())
}

pub fn status() -> Result<()> {
    let Some(session) = session::load() else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("Logged in");
    println!("  Email:   {}", session.email);
    println!("  User id: {}", session.user_id);
    println!("  Role:    {}", session.role);
    println!("  Token:   {}", session.masked_token());
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let Some(session) = session::load() else {
        anyhow::bail!("Not logged in. Run `deskmon login` first.");
    };

    let client = ApiClient::from_config(config)?;
    let profile = match client.me(&session.access_token).await {
        Ok(profile) => profile,
        Err(err) => anyhow::bail!("Could not fetch profile: {err}"),
    };

    println!("Email:     {}", profile.email.as_deref().unwrap_or(""));
    println!("Full name: {}", profile.full_name.as_deref().unwrap_or(""));
    println!("Role:      {}", profile.role.as_deref().unwrap_or(""));
    if let Some(id) = profile.id.or(profile.user_id) {
        println!("User id:   {id}");
    }
    Ok(())
}
