//! Config command handlers.

use anyhow::{Context, Result};
use deskmon_core::config;

pub fn path() -> Result<()> {
    println!("{}", config::paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("URL cannot be empty");
    }

    config::Config::save_api_base_url(url)?;
    println!("Set api_base_url to {url}");
    println!("  in {}", config::paths::config_path().display());
    Ok(())
}
